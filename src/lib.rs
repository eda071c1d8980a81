#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions
)]

//! # Marksmith
//!
//! Converts a small Markdown dialect to HTML with an ordered list of
//! regex rewrites, and serves articles and resource files from a local
//! library.
//!
//! ## Modules
//!
//! - [`document`]: the rewrite pipeline and page output
//! - [`library`]: catalog-driven article and resource access
//! - [`config`]: saved command-line defaults
//! - [`watcher`]: re-conversion on file changes
//! - [`perf`]: timing and the rewrite debug log

pub mod config;
pub mod document;
pub mod library;
pub mod perf;
pub mod watcher;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::document::{convert, render_page};
    pub use crate::library::{DirStorage, Library, Manifest, Storage};
}
