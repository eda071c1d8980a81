//! Markdown to HTML conversion.
//!
//! Conversion is a fixed sequence of whole-buffer rewrites:
//! - Headings, then the inline spans (bold, italic, code, links)
//! - Block lines (list items and their grouping, blockquotes, rules)
//! - Paragraph segmentation on blank lines
//!
//! There is no syntax tree. Each pass sees exactly what the previous pass
//! produced, so running [`convert`] on its own output is not a no-op.

mod page;
mod paragraph;
mod rules;

use std::borrow::Cow;

use crate::perf;

pub use page::render_page;
pub use paragraph::wrap_paragraphs;
pub use rules::{Rewrite, Rule, rules};

/// Convert restricted Markdown to HTML.
///
/// Never fails. Unmatched delimiters are left in the output as typed.
///
/// # Example
///
/// ```
/// use marksmith::document::convert;
///
/// assert_eq!(convert("# Title"), "<h1>Title</h1>");
/// assert_eq!(convert("a *b*"), "<p>a <em>b</em></p>");
/// ```
pub fn convert(markdown: &str) -> String {
    let _scope = perf::scope("document.convert");
    tracing::debug!(bytes = markdown.len(), "converting markdown");

    let mut html = markdown.to_owned();
    for rule in rules() {
        let before = html.len();
        if let Cow::Owned(rewritten) = rule.apply(&html) {
            html = rewritten;
        }
        if perf::is_debug_log_enabled() {
            perf::log_event(
                &format!("rewrite.{}", rule.name()),
                format!("{before} -> {} bytes", html.len()),
            );
        }
    }

    let html = wrap_paragraphs(&html);
    if perf::is_debug_log_enabled() {
        perf::log_event("rewrite.paragraphs", format!("{} bytes", html.len()));
    }
    html
}
