//! Markdown to HTML rendering.
//!
//! Reports arrive as GitHub-flavoured markdown (tables are common), so the
//! parser runs with table and strikethrough extensions enabled.

use crate::report::score::Badge;
use pulldown_cmark::{html, Options, Parser};

/// Convert a markdown report into an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Generate a standalone page holding the report panel and, when present, the badge.
pub fn generate_report_page(report_html: &str, badge: Option<&Badge>) -> String {
    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<title>Creative Strategy Analysis</title>\n");
    page.push_str("<style>\n");
    page.push_str("body { font-family: -apple-system, 'Helvetica Neue', Arial, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1d1d1f; }\n");
    page.push_str("table { border-collapse: collapse; width: 100%; }\n");
    page.push_str("th, td { border: 1px solid #d2d2d7; padding: 0.4rem 0.6rem; text-align: left; }\n");
    page.push_str(".badge { display: inline-block; color: #fff; font-weight: 600; padding: 0.4rem 0.9rem; border-radius: 999px; }\n");
    page.push_str("</style>\n</head>\n<body>\n");

    page.push_str("<section id=\"report-panel\">\n");
    if let Some(badge) = badge {
        page.push_str(&format!(
            "<div id=\"success-probability\" class=\"badge\" style=\"background: {}\">{}</div>\n",
            badge.tier.gradient(),
            escape_html(&badge.text())
        ));
    }
    page.push_str("<div id=\"report-content\">\n");
    page.push_str(report_html);
    page.push_str("</div>\n</section>\n");

    page.push_str("</body>\n</html>\n");
    page
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::score::ScoreTier;

    #[test]
    fn test_headings_and_emphasis() {
        let html = markdown_to_html("## Executive Summary\n- **Verdict:** GO\n");
        assert!(html.contains("<h2>Executive Summary</h2>"));
        assert!(html.contains("<strong>Verdict:</strong> GO"));
        assert!(html.contains("<li>"));
    }

    #[test]
    fn test_tables_are_rendered() {
        let markdown = "| Variable | Weight |\n| :--- | :--- |\n| Motivation | 50% |\n";
        let html = markdown_to_html(markdown);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th"));
        assert!(html.contains("Motivation"));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(markdown_to_html(""), "");
    }

    #[test]
    fn test_page_with_badge() {
        let badge = Badge::new(85);
        let page = generate_report_page("<p>body</p>", Some(&badge));
        assert!(page.contains("id=\"success-probability\""));
        assert!(page.contains("85% Success"));
        assert!(page.contains(ScoreTier::Green.gradient()));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_page_without_badge() {
        let page = generate_report_page("<p>body</p>", None);
        assert!(!page.contains("success-probability"));
        assert!(page.contains("id=\"report-content\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
