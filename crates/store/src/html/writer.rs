//! HTML Writer - renders a Document as an HTML fragment

use super::{tag_for_kind, MAX_NESTING};
use crate::{Result, StoreError};
use doc_model::{Document, Element, Node, Text};
use std::fmt::Write;

/// Mark tags of a leaf in wrapping order, innermost first
fn mark_tags(text: &Text) -> [(bool, &'static str); 4] {
    [
        (text.marks.code, "code"),
        (text.marks.underline, "u"),
        (text.marks.italic, "em"),
        (text.marks.bold, "strong"),
    ]
}

/// Renders documents as HTML fragments
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    max_nesting: usize,
}

impl HtmlWriter {
    /// Create a new HTML writer
    pub fn new() -> Self {
        Self {
            max_nesting: MAX_NESTING,
        }
    }

    /// Render the whole document
    pub fn write(&self, document: &Document) -> Result<String> {
        let mut html = String::new();
        for node in &document.children {
            self.write_node(&mut html, node, 1)?;
        }
        Ok(html)
    }

    fn write_node(&self, html: &mut String, node: &Node, depth: usize) -> Result<()> {
        if depth > self.max_nesting {
            return Err(StoreError::NestingTooDeep(self.max_nesting));
        }
        match node {
            Node::Text(text) => self.write_text(html, text),
            Node::Element(element) => self.write_element(html, element, depth),
        }
    }

    fn write_text(&self, html: &mut String, text: &Text) -> Result<()> {
        let mut rendered = escape_html(&text.text);
        for (has_mark, tag) in mark_tags(text) {
            if has_mark {
                rendered = format!("<{tag}>{rendered}</{tag}>");
            }
        }
        html.push_str(&rendered);
        Ok(())
    }

    fn write_element(&self, html: &mut String, element: &Element, depth: usize) -> Result<()> {
        let tag = tag_for_kind(&element.kind);
        write!(html, "<{}", tag)?;
        match (element.url(), element.align) {
            (Some(url), _) => write!(html, " href=\"{}\"", escape_html_attr(url))?,
            (None, Some(align)) => write!(html, " style=\"text-align: {}\"", align.as_str())?,
            (None, None) => {}
        }
        html.push('>');

        for child in &element.children {
            self.write_node(html, child, depth + 1)?;
        }

        write!(html, "</{}>", tag)?;
        Ok(())
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Escape HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Alignment, ElementKind, Mark};

    #[test]
    fn test_mark_nesting_order() {
        let text = Text::new("x")
            .mark(Mark::Bold)
            .mark(Mark::Italic)
            .mark(Mark::Underline)
            .mark(Mark::Code);
        let doc = Document::new(vec![Element::paragraph(vec![text.into()]).into()]);
        let html = HtmlWriter::new().write(&doc).unwrap();
        assert_eq!(html, "<p><strong><em><u><code>x</code></u></em></strong></p>");
    }

    #[test]
    fn test_list_with_alignment() {
        let doc = Document::new(vec![Element::new(
            ElementKind::NumberedList,
            vec![Element::new(ElementKind::ListItem, vec![Node::text("one")])
                .with_align(Alignment::Right)
                .into()],
        )
        .into()]);
        let html = HtmlWriter::new().write(&doc).unwrap();
        assert_eq!(html, "<ol><li style=\"text-align: right\">one</li></ol>");
    }

    #[test]
    fn test_link_ignores_align_and_escapes_href() {
        let mut link = Element::link("https://x.com/?a=1&b=\"2\"", vec![Node::text("q")]);
        link.align = Some(Alignment::Center);
        let doc = Document::new(vec![Element::paragraph(vec![link.into()]).into()]);
        let html = HtmlWriter::new().write(&doc).unwrap();
        assert_eq!(
            html,
            "<p><a href=\"https://x.com/?a=1&amp;b=&quot;2&quot;\">q</a></p>"
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_html("a & b < c > d"), "a &amp; b &lt; c &gt; d");
    }
}
