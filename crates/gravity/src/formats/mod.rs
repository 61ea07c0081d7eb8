// ABOUTME: Output renderers for the formatted top node.
// ABOUTME: Produces paragraph-separated plain text, cleaned outer HTML, and Markdown.

//! Output format conversion module.
//!
//! Text and HTML are rendered straight from the top node in the document
//! arena. Markdown is derived from the rendered HTML.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

use crate::dom::tree::node_text;

static EMPTY_PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>(?:\s|&nbsp;)*</p>").unwrap());
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Trimmed text of every direct child, text nodes included, joined by a blank line.
///
/// Whitespace-only children are skipped. Line breaks inside a child are kept.
pub fn render_text(top: ElementRef<'_>) -> String {
    top.children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            Node::Element(_) => Some(node_text(child).trim().to_string()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Outer HTML of the top node with empty paragraphs stripped.
pub fn render_html(top: ElementRef<'_>) -> String {
    EMPTY_PARAGRAPH_RE.replace_all(&top.html(), "").into_owned()
}

/// Convert HTML to Markdown using htmd.
///
/// Skips script and style tags during conversion, preserves links and images,
/// and normalizes consecutive blank lines to max 2.
/// On conversion error, returns the preprocessed HTML unchanged.
pub fn html_to_markdown(html: &str) -> String {
    let preprocessed = BR_RE.replace_all(html, "\n");

    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .build();

    let md = converter
        .convert(&preprocessed)
        .unwrap_or_else(|_| preprocessed.to_string());

    BLANK_LINES_RE.replace_all(&md, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};

    fn top(doc: &Html) -> ElementRef<'_> {
        doc.select(&Selector::parse("#top").unwrap()).next().unwrap()
    }

    #[test]
    fn render_text_joins_every_child() {
        let doc = Html::parse_fragment(
            r#"<div id="top"><p>  First   para. </p> stray text <p></p><ul><li>one</li> <li>two</li></ul></div>"#,
        );
        assert_eq!(
            render_text(top(&doc)),
            "First   para.\n\nstray text\n\none two"
        );
    }

    #[test]
    fn render_text_keeps_bare_text() {
        let doc = Html::parse_fragment(r#"<div id="top">  only text </div>"#);
        assert_eq!(render_text(top(&doc)), "only text");
    }

    #[test]
    fn render_text_keeps_line_breaks_in_pre() {
        let doc = Html::parse_fragment(
            "<div id=\"top\"><pre>line one of the code\nline two of the code</pre>\n</div>",
        );
        assert_eq!(
            render_text(top(&doc)),
            "line one of the code\nline two of the code"
        );
    }

    #[test]
    fn render_html_strips_empty_paragraphs() {
        let doc = Html::parse_fragment(
            r#"<div id="top"><p>Kept</p><p></p><p class="x">   </p><p>&nbsp;</p></div>"#,
        );
        assert_eq!(render_html(top(&doc)), r#"<div id="top"><p>Kept</p></div>"#);
    }

    #[test]
    fn html_to_markdown_converts_paragraphs_and_emphasis() {
        let md = html_to_markdown("<h2>Title</h2><p>Some <strong>bold</strong> text.</p>");
        assert!(md.contains("## Title"), "expected markdown h2, got: {}", md);
        assert!(md.contains("**bold**"), "expected bold markdown, got: {}", md);
    }

    #[test]
    fn html_to_markdown_preserves_links() {
        let md = html_to_markdown(r#"<p>Visit <a href="https://example.com">Example</a></p>"#);
        assert!(
            md.contains("[Example](https://example.com)"),
            "should preserve link, got: {}",
            md
        );
    }

    #[test]
    fn html_to_markdown_skips_script() {
        let md = html_to_markdown("<p>Before</p><script>alert(1)</script><p>After</p>");
        assert!(!md.contains("alert"), "got: {}", md);
        assert!(md.contains("Before") && md.contains("After"), "got: {}", md);
    }

    #[test]
    fn html_to_markdown_collapses_excessive_blank_lines() {
        let md = html_to_markdown("<p>Para 1</p>\n\n\n\n\n<p>Para 2</p>");
        assert!(!md.contains("\n\n\n"), "got: {:?}", md);
    }

    #[test]
    fn html_to_markdown_empty_input() {
        assert_eq!(html_to_markdown(""), "");
    }
}
