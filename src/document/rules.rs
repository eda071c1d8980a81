//! The ordered rewrite rule table.
//!
//! Rules compile once on first use and are shared read-only by every
//! conversion. Their order is significant: bold must consume `**` pairs
//! before italic sees single asterisks, and list items must exist before
//! the grouping rule wraps them.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// How a rule turns a match into replacement text.
#[derive(Debug, Clone, Copy)]
pub enum Rewrite {
    /// A `regex` replacement template such as `<em>${1}</em>`.
    Template(&'static str),
    /// Replacement computed from the captures.
    Computed(fn(&Captures<'_>) -> String),
}

/// A single pattern/replacement pair applied to the whole buffer.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, rewrite: Rewrite) -> Self {
        let pattern = Regex::new(pattern).expect("rewrite rule pattern must compile");
        Self {
            name,
            pattern,
            rewrite,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Rewrite every non-overlapping match in `text`.
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(text, template),
            Rewrite::Computed(rewrite) => self.pattern.replace_all(text, rewrite),
        }
    }
}

// `R` puts the anchors and `.` in CRLF mode so a trailing `\r` is never
// captured into an element.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "heading",
            r"(?mR)^(#{1,6})\s+(.+)$",
            Rewrite::Computed(heading),
        ),
        Rule::new(
            "bold",
            r"(?R)\*\*(.*?)\*\*",
            Rewrite::Template("<strong>${1}</strong>"),
        ),
        Rule::new("italic", r"(?R)\*(.*?)\*", Rewrite::Template("<em>${1}</em>")),
        Rule::new("code", r"(?R)`(.*?)`", Rewrite::Template("<code>${1}</code>")),
        Rule::new(
            "link",
            r"(?R)\[(.*?)\]\((.*?)\)",
            Rewrite::Template(r#"<a href="${2}" target="_blank">${1}</a>"#),
        ),
        Rule::new(
            "list-item",
            r"(?mR)^[-*]\s+(.+)$",
            Rewrite::Template("<li>${1}</li>"),
        ),
        // Greedy and single-line: only items with nothing between them
        // share a <ul>. Items on consecutive lines stay separate.
        Rule::new(
            "list-group",
            r"(?R)<li>.*</li>",
            Rewrite::Template("<ul>${0}</ul>"),
        ),
        Rule::new(
            "blockquote",
            r"(?mR)^>\s+(.+)$",
            Rewrite::Template("<blockquote>${1}</blockquote>"),
        ),
        Rule::new("horizontal-rule", r"(?mR)^---$", Rewrite::Template("<hr>")),
    ]
});

fn heading(caps: &Captures<'_>) -> String {
    let level = caps[1].len();
    format!("<h{level}>{}</h{level}>", &caps[2])
}

/// The rule table in application order.
pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static Rule {
        rules()
            .iter()
            .find(|rule| rule.name() == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    #[test]
    fn test_rules_are_in_pipeline_order() {
        let names: Vec<_> = rules().iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "heading",
                "bold",
                "italic",
                "code",
                "link",
                "list-item",
                "list-group",
                "blockquote",
                "horizontal-rule",
            ]
        );
    }

    #[test]
    fn test_apply_without_match_borrows_input() {
        let result = rule("bold").apply("nothing to see");
        assert!(matches!(result, Cow::Borrowed("nothing to see")));
    }

    #[test]
    fn test_heading_level_follows_hash_count() {
        let heading = rule("heading");
        assert_eq!(heading.apply("### Three"), "<h3>Three</h3>");
        assert_eq!(heading.apply("###### Six"), "<h6>Six</h6>");
    }

    #[test]
    fn test_heading_requires_whitespace_after_hashes() {
        assert_eq!(rule("heading").apply("#hashtag"), "#hashtag");
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        assert_eq!(rule("heading").apply("####### nope"), "####### nope");
    }

    #[test]
    fn test_heading_ignores_carriage_return() {
        assert_eq!(
            rule("heading").apply("# One\r\n## Two\r\n"),
            "<h1>One</h1>\r\n<h2>Two</h2>\r\n"
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            rule("bold").apply("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_italic_alone_splits_double_asterisks() {
        // Why bold has to run first.
        assert_eq!(rule("italic").apply("**x**"), "<em></em>x<em></em>");
    }

    #[test]
    fn test_inline_spans_do_not_cross_lines() {
        assert_eq!(rule("italic").apply("*a\nb*"), "*a\nb*");
        assert_eq!(rule("code").apply("`a\nb`"), "`a\nb`");
    }

    #[test]
    fn test_link_template_opens_new_context() {
        assert_eq!(
            rule("link").apply("[docs](https://example.com)"),
            r#"<a href="https://example.com" target="_blank">docs</a>"#
        );
    }

    #[test]
    fn test_list_group_wraps_only_same_line_items() {
        let group = rule("list-group");
        assert_eq!(
            group.apply("<li>a</li><li>b</li>"),
            "<ul><li>a</li><li>b</li></ul>"
        );
        assert_eq!(
            group.apply("<li>a</li>\n<li>b</li>"),
            "<ul><li>a</li></ul>\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_horizontal_rule_must_be_whole_line() {
        let hr = rule("horizontal-rule");
        assert_eq!(hr.apply("---"), "<hr>");
        assert_eq!(hr.apply("----"), "----");
        assert_eq!(hr.apply("a---"), "a---");
    }
}
