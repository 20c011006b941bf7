//! Integration tests for HTML persistence
//! Tests that serialized documents parse back to the same tree
//!
//! Generated documents cover every block kind, alignment, all four marks,
//! links, and text containing characters that need escaping.

use doc_model::{Alignment, Document, Element, ElementKind, Marks, Node, Text};
use proptest::prelude::*;
use store::{deserialize, serialize, HtmlReader, HtmlWriter};

fn marks() -> impl Strategy<Value = Marks> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(bold, italic, underline, code)| Marks {
        bold,
        italic,
        underline,
        code,
    })
}

fn leaf() -> impl Strategy<Value = Node> {
    ("[a-zA-Z0-9 &<>\"'.;#]{1,8}", marks()).prop_map(|(text, marks)| Text::with_marks(text, marks).into())
}

fn inline() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => leaf(),
        1 => ("https://[a-z]{1,6}\\.com/\\?q=[a-z&\"]{0,4}", prop::collection::vec(leaf(), 1..3))
            .prop_map(|(url, children)| Element::link(url, children).into()),
    ]
}

fn alignment() -> impl Strategy<Value = Option<Alignment>> {
    prop_oneof![
        Just(None),
        Just(Some(Alignment::Left)),
        Just(Some(Alignment::Center)),
        Just(Some(Alignment::Right)),
    ]
}

fn text_block(kind: ElementKind) -> impl Strategy<Value = Element> {
    (prop::collection::vec(inline(), 1..4), alignment()).prop_map(move |(children, align)| Element {
        kind: kind.clone(),
        align,
        children,
    })
}

fn block() -> impl Strategy<Value = Node> {
    let list_kind = prop_oneof![Just(ElementKind::BulletedList), Just(ElementKind::NumberedList)];
    prop_oneof![
        text_block(ElementKind::Paragraph).prop_map(Node::from),
        text_block(ElementKind::HeadingOne).prop_map(Node::from),
        text_block(ElementKind::HeadingTwo).prop_map(Node::from),
        text_block(ElementKind::BlockQuote).prop_map(Node::from),
        (list_kind, prop::collection::vec(text_block(ElementKind::ListItem), 1..4), alignment()).prop_map(
            |(kind, items, align)| Element {
                kind,
                align,
                children: items.into_iter().map(Node::from).collect(),
            }
            .into()
        ),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 1..5).prop_map(Document::new)
}

proptest! {
    #[test]
    fn prop_round_trip_is_identity(doc in document()) {
        let html = serialize(&doc);
        prop_assert!(!html.is_empty());
        prop_assert_eq!(deserialize(Some(&html)), doc);
    }

    #[test]
    fn prop_serialize_parse_serialize_is_stable(doc in document()) {
        let html = HtmlWriter::new().write(&doc).unwrap();
        let reparsed = HtmlReader::new().read(&html).unwrap();
        prop_assert_eq!(HtmlWriter::new().write(&reparsed).unwrap(), html);
    }

    #[test]
    fn prop_deserialize_never_panics(input in "\\PC{0,64}") {
        let doc = deserialize(Some(&input));
        prop_assert!(!doc.text_blocks().is_empty());
    }
}

#[test]
fn test_empty_document_round_trip() {
    let doc = Document::empty();
    assert_eq!(serialize(&doc), "<p></p>");
    assert!(deserialize(Some("<p></p>")).is_empty());
}

#[test]
fn test_escaped_text_has_no_raw_brackets() {
    let doc = Document::new(vec![Element::paragraph(vec![Node::text("<script>")]).into()]);
    let html = serialize(&doc);
    let inner = html.trim_start_matches("<p>").trim_end_matches("</p>");
    assert_eq!(inner, "&lt;script&gt;");
    assert!(!inner.contains('<') && !inner.contains('>'));
}

#[test]
fn test_browser_style_markup() {
    let html = r#"<!DOCTYPE html>
<html><head><title>Notes</title></head>
<body>
  <div class="note">
    <h2>Shopping</h2>
    <ol><li><b>Milk</b><li>Bread &amp; butter</ol>
    <p>Ask <a href="mailto:me@x.com">me</a><br></p>
  </div>
</body></html>"#;
    let doc = deserialize(Some(html));
    assert_eq!(doc.plain_text(), "Shopping\nMilk\nBread & butter\nAsk me");
    assert_eq!(doc.element(&[1]).unwrap().kind, ElementKind::NumberedList);
}

#[test]
fn test_named_entities_survive_round_trip() {
    let doc = deserialize(Some("<p>Descri&ccedil;&atilde;o &eacute; &mdash; ok</p>"));
    assert_eq!(doc.plain_text(), "Descrição é — ok");
    assert_eq!(deserialize(Some(&serialize(&doc))), doc);
}

#[test]
fn test_comparison_text_survives_round_trip() {
    let doc = deserialize(Some("<p>1 < 2 and 3 > 2</p><p>next</p>"));
    assert_eq!(doc.plain_text(), "1 < 2 and 3 > 2\nnext");
    assert_eq!(deserialize(Some(&serialize(&doc))), doc);
}
