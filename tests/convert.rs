use marksmith::document::{convert, rules};
use proptest::prelude::*;

#[test]
fn test_fixture_converts_to_expected_html() {
    let markdown = include_str!("fixtures/sample.md");
    let expected = include_str!("fixtures/sample.html");
    assert_eq!(convert(markdown.trim_end()), expected.trim_end());
}

#[test]
fn test_list_and_quote_grouping_is_asymmetric() {
    // Same-line items share a list; quoted lines never merge.
    let html = convert("- a\n- b\n\n> x\n> y");
    assert_eq!(
        html,
        "<ul><li>a</li></ul>\n<ul><li>b</li></ul>\n<blockquote>x</blockquote>\n<blockquote>y</blockquote>"
    );
}

#[test]
fn test_heading_then_paragraph_in_one_segment_is_not_wrapped() {
    // The segment starts with <h, so the trailing text stays bare.
    assert_eq!(convert("# Title\nbody"), "<h1>Title</h1>\nbody");
}

#[test]
fn test_link_label_keeps_inline_markup() {
    assert_eq!(
        convert("[**bold** link](/x)"),
        r#"<p><a href="/x" target="_blank"><strong>bold</strong> link</a></p>"#
    );
}

#[test]
fn test_raw_html_is_not_escaped() {
    assert_eq!(convert("<b>hi</b> & bye"), "<p><b>hi</b> & bye</p>");
}

#[test]
fn test_rule_table_is_shared_between_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || convert(&format!("# T{i}"))))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<h1>T{i}</h1>"));
    }
    assert_eq!(rules().len(), 9);
}

proptest! {
    /// Text without Markdown syntax only gains paragraph tags.
    #[test]
    fn plain_text_is_wrapped_per_segment(
        segments in prop::collection::vec("[a-zA-Z0-9 ,.]{0,6}[a-zA-Z0-9][a-zA-Z0-9 ,.]{0,6}", 1..5)
    ) {
        let input = segments.join("\n\n");
        let expected = segments
            .iter()
            .map(|s| format!("<p>{s}</p>"))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(convert(&input), expected);
    }

    /// Any input converts without panicking.
    #[test]
    fn convert_is_total(input in "[ -~\n]{0,64}") {
        let _ = convert(&input);
    }
}
