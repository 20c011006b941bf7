//! HTML Import/Export Module
//!
//! Documents persist as HTML fragments using a small tag vocabulary:
//!
//! - `p`, `h1`, `h2`, `blockquote`, `ul`, `ol`, `li` - block elements
//! - `a href` - links, the only inline element
//! - `strong`/`b`, `em`/`i`, `u`, `code` - marks on the wrapped text
//! - `style="text-align: ..."` - block alignment
//!
//! Any other tag is transparent on import: its children are kept and the
//! tag itself is dropped.

mod reader;
mod writer;

pub use reader::HtmlReader;
pub use writer::HtmlWriter;

use doc_model::{Document, ElementKind, Mark};

/// Deepest element nesting accepted on import or produced on export
pub const MAX_NESTING: usize = 256;

/// Parse an HTML fragment, falling back to the canonical empty document.
///
/// Absent, empty, and whitespace-only input yields the empty document
/// silently; malformed input is logged.
pub fn deserialize(html: Option<&str>) -> Document {
    let Some(html) = html else {
        return Document::empty();
    };
    match HtmlReader::new().read(html) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse HTML, using empty document");
            Document::empty()
        }
    }
}

/// Render a document as HTML, falling back to an empty string
pub fn serialize(document: &Document) -> String {
    match HtmlWriter::new().write(document) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize document to HTML");
            String::new()
        }
    }
}

/// Tag name written for an element kind
pub(crate) fn tag_for_kind(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Paragraph => "p",
        ElementKind::HeadingOne => "h1",
        ElementKind::HeadingTwo => "h2",
        ElementKind::BlockQuote => "blockquote",
        ElementKind::BulletedList => "ul",
        ElementKind::NumberedList => "ol",
        ElementKind::ListItem => "li",
        ElementKind::Link { .. } => "a",
    }
}

/// Element kind for a block tag; links are handled separately since they
/// need the `href` attribute
pub(crate) fn kind_for_tag(tag: &str) -> Option<ElementKind> {
    match tag {
        "p" => Some(ElementKind::Paragraph),
        "h1" => Some(ElementKind::HeadingOne),
        "h2" => Some(ElementKind::HeadingTwo),
        "blockquote" => Some(ElementKind::BlockQuote),
        "ul" => Some(ElementKind::BulletedList),
        "ol" => Some(ElementKind::NumberedList),
        "li" => Some(ElementKind::ListItem),
        _ => None,
    }
}

/// Mark applied by an inline formatting tag
pub(crate) fn mark_for_tag(tag: &str) -> Option<Mark> {
    match tag {
        "strong" | "b" => Some(Mark::Bold),
        "em" | "i" => Some(Mark::Italic),
        "u" => Some(Mark::Underline),
        "code" => Some(Mark::Code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Alignment, Element, Node, Text};

    #[test]
    fn test_empty_inputs_yield_canonical_document() {
        assert!(deserialize(None).is_empty());
        assert!(deserialize(Some("")).is_empty());
        assert!(deserialize(Some("   \n\t")).is_empty());
        assert!(deserialize(Some("not valid <<< html")).is_empty());
    }

    #[test]
    fn test_nested_marks_accumulate() {
        let doc = deserialize(Some("<p><strong><em>hi</em></strong></p>"));
        let para = doc.element(&[0]).unwrap();
        assert_eq!(
            para.children,
            vec![Text::new("hi").mark(Mark::Bold).mark(Mark::Italic).into()]
        );
    }

    #[test]
    fn test_transparent_wrapper_flattens() {
        let doc = deserialize(Some("<div><p>a</p><p>b</p></div>"));
        assert_eq!(doc.children.len(), 2);
        assert!(doc
            .children
            .iter()
            .all(|n| n.as_element().map(|e| &e.kind) == Some(&ElementKind::Paragraph)));
        assert_eq!(doc.plain_text(), "a\nb");
    }

    #[test]
    fn test_script_text_is_escaped() {
        let doc = Document::new(vec![Element::paragraph(vec![Node::text("<script>")]).into()]);
        let html = serialize(&doc);
        assert_eq!(html, "<p>&lt;script&gt;</p>");
        assert_eq!(deserialize(Some(&html)), doc);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let input = "<h1 style=\"text-align: center\">Title</h1><p>Body <a href=\"https://x.com\">link</a></p>";
        let doc = deserialize(Some(input));
        let expected = Document::new(vec![
            Element::new(ElementKind::HeadingOne, vec![Node::text("Title")])
                .with_align(Alignment::Center)
                .into(),
            Element::paragraph(vec![
                Node::text("Body "),
                Element::link("https://x.com", vec![Node::text("link")]).into(),
            ])
            .into(),
        ]);
        assert_eq!(doc, expected);

        let html = serialize(&doc);
        assert_eq!(html, input);
        assert_eq!(deserialize(Some(&html)), expected);
    }

    #[test]
    fn test_too_deep_document_serializes_to_empty_string() {
        let mut node: Node = Element::paragraph(vec![Node::text("deep")]).into();
        for _ in 0..MAX_NESTING {
            node = Element::new(ElementKind::BlockQuote, vec![node]).into();
        }
        let doc = Document::new(vec![node]);
        assert_eq!(serialize(&doc), "");
    }
}
