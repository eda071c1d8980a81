//! Paragraph segmentation, the last pass of a conversion.

/// Segments starting with one of these are already block-level output.
const BLOCK_OPENERS: &[&str] = &["<h", "<ul", "<blockquote", "<hr"];

/// Wrap each blank-line separated segment in `<p>` unless it is empty or
/// already begins with a block tag.
///
/// The opener check looks at the raw segment, so a segment with leading
/// whitespace before a block tag still gets wrapped. Segments are rejoined
/// with a single newline.
pub fn wrap_paragraphs(html: &str) -> String {
    html.split("\n\n")
        .map(|segment| {
            if is_paragraph(segment) {
                format!("<p>{segment}</p>")
            } else {
                segment.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_paragraph(segment: &str) -> bool {
    !segment.trim().is_empty()
        && !BLOCK_OPENERS
            .iter()
            .any(|opener| segment.starts_with(opener))
}
