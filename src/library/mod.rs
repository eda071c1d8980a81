//! Article and resource library.
//!
//! Supplies Markdown text to the converter and exports resource files.
//! Every operation reports failure through a value:
//! - Existence checks return `false` for anything missing or unreadable
//! - Reads return a [`ReadOutcome`] with placeholder content on failure
//! - Exports return an [`ExportOutcome`] carrying the notification text

mod catalog;
mod error;
mod storage;

use std::fmt;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub use catalog::{CatalogEntry, Manifest};
pub use error::SourceError;
pub use storage::{DirStorage, Storage};

/// Shown in place of an article that does not exist.
pub const NO_FILE: &str = "No file";

/// Shown in place of an article that exists but could not be read.
pub const LOAD_FAILED: &str = "Failed to load article";

const DEFAULT_DESCRIPTION: &str = "Resource file";

/// Characters `encodeURIComponent` leaves alone, so encoded names match
/// what a browser would request.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Technology,
    Design,
    Programming,
    Other,
}

impl Category {
    /// Classify an article by keywords in its title. First match wins.
    pub fn from_title(title: &str) -> Self {
        let has = |words: &[&str]| words.iter().any(|w| title.contains(w));
        if has(&["Web", "开发"]) {
            Self::Technology
        } else if has(&["设计", "响应式"]) {
            Self::Design
        } else if has(&["JavaScript", "编程"]) {
            Self::Programming
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Technology => "Technology",
            Self::Design => "Design",
            Self::Programming => "Programming",
            Self::Other => "Other",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEntry {
    pub filename: String,
    pub encoded_filename: String,
    pub title: String,
    pub category: Category,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub filename: String,
    pub size: String,
    pub description: String,
    pub path: PathBuf,
}

/// Result of reading a document by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub success: bool,
    /// The document text, or [`NO_FILE`] on failure.
    pub content: String,
    pub message: String,
}

/// Result of exporting a resource, phrased for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
}

/// Articles and resource files behind two storages.
#[derive(Debug, Clone)]
pub struct Library<S> {
    articles: S,
    files: S,
    manifest: Manifest,
}

impl Library<DirStorage> {
    pub fn open(
        article_dir: impl Into<PathBuf>,
        file_dir: impl Into<PathBuf>,
        manifest: Manifest,
    ) -> Self {
        Self::new(
            DirStorage::new(article_dir),
            DirStorage::new(file_dir),
            manifest,
        )
    }
}

impl<S: Storage> Library<S> {
    pub const fn new(articles: S, files: S, manifest: Manifest) -> Self {
        Self {
            articles,
            files,
            manifest,
        }
    }

    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Catalog articles that exist, in catalog order.
    pub fn articles(&self) -> Vec<ArticleEntry> {
        let found: Vec<_> = self
            .manifest
            .articles
            .iter()
            .filter_map(|entry| self.article_entry(&entry.filename))
            .collect();
        tracing::info!(
            found = found.len(),
            listed = self.manifest.articles.len(),
            "loaded articles"
        );
        found
    }

    fn article_entry(&self, filename: &str) -> Option<ArticleEntry> {
        if !self.articles.exists(filename) {
            tracing::warn!(filename, "article not found");
            return None;
        }
        let title = filename.replace(".md", "");
        Some(ArticleEntry {
            filename: filename.to_owned(),
            encoded_filename: encode_component(filename),
            category: Category::from_title(&title),
            title,
            path: self.articles.path(filename),
        })
    }

    /// Article text, or a placeholder when it is missing or unreadable.
    pub fn article_content(&self, filename: &str) -> String {
        if !self.articles.exists(filename) {
            return NO_FILE.to_owned();
        }
        match self.articles.read_text(filename) {
            Ok(content) => content,
            Err(err) if err.is_not_found() => NO_FILE.to_owned(),
            Err(err) => {
                tracing::error!(filename, %err, "failed to load article");
                LOAD_FAILED.to_owned()
            }
        }
    }

    /// Check for an article and read it.
    pub fn read(&self, filename: &str) -> ReadOutcome {
        let path = self.articles.path(filename);
        if !self.articles.exists(filename) {
            return ReadOutcome {
                success: false,
                content: NO_FILE.to_owned(),
                message: format!("File does not exist: {}", path.display()),
            };
        }
        match self.articles.read_text(filename) {
            Ok(content) => ReadOutcome {
                success: true,
                content,
                message: format!("Read file: {}", path.display()),
            },
            Err(err) => {
                tracing::error!(filename, %err, "dynamic read failed");
                ReadOutcome {
                    success: false,
                    content: NO_FILE.to_owned(),
                    message: format!("Failed to read file: {err}"),
                }
            }
        }
    }

    /// Catalog resource files that exist, in catalog order.
    pub fn resources(&self) -> Vec<ResourceEntry> {
        self.manifest
            .files
            .iter()
            .filter_map(|entry| {
                let bytes = self.files.size(&entry.filename)?;
                Some(ResourceEntry {
                    filename: entry.filename.clone(),
                    size: format_size(bytes),
                    description: entry
                        .description
                        .clone()
                        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
                    path: self.files.path(&entry.filename),
                })
            })
            .collect()
    }

    /// Copy a resource file into `dest_dir` and report the result.
    pub fn export(&self, filename: &str, dest_dir: &Path) -> ExportOutcome {
        if !self.files.exists(filename) {
            return ExportOutcome::failed("File not found".to_owned());
        }
        match self.files.copy_to(filename, dest_dir) {
            Ok(to) => {
                tracing::info!(filename, to = %to.display(), "export finished");
                let message = format!("Started download: {filename}");
                tracing::info!("{message}");
                ExportOutcome {
                    success: true,
                    message,
                }
            }
            Err(err) => ExportOutcome::failed(format!("Download failed: {err}")),
        }
    }
}

impl ExportOutcome {
    fn failed(message: String) -> Self {
        tracing::error!("{message}");
        Self {
            success: false,
            message,
        }
    }
}

/// Percent-encode a file name the way `encodeURIComponent` does.
pub fn encode_component(name: &str) -> String {
    utf8_percent_encode(name, COMPONENT).to_string()
}

/// Human-readable size with one decimal, e.g. `2.5MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1}{unit}")
}
