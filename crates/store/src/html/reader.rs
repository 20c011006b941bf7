//! HTML Reader - parses HTML fragments into a Document
//!
//! Parsing happens in two passes:
//! - quick-xml tokenizes the fragment and a lenient tree builder closes
//!   void elements, implied `p`/`li` ends, and unmatched tags the way
//!   browsers do
//! - the resulting tree is walked into document nodes, with mark tags
//!   turned into text flags and unknown tags passed through

use super::{kind_for_tag, mark_for_tag, MAX_NESTING};
use crate::{Result, StoreError};
use doc_model::{Alignment, Document, Element, ElementKind, Marks, Node, Text};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Elements that never have content or an end tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose whole subtree is dropped
const SKIPPED_TAGS: &[&str] = &["script", "style", "head", "title", "template"];

/// Block-level tags; opening one closes an open paragraph
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "ul", "ol", "li", "div", "section",
    "article", "header", "footer", "nav", "aside", "pre", "table", "hr", "body", "html",
];

/// Longest entity reference tried when decoding a stray `&`
const MAX_ENTITY_LEN: usize = 32;

// =============================================================================
// Parsed tree
// =============================================================================

#[derive(Debug)]
enum DomNode {
    Element(DomElement),
    Text(String),
}

#[derive(Debug, Default)]
struct DomElement {
    /// Lowercased tag name; empty for the fragment root
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<DomNode>,
}

impl DomElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let tag = std::str::from_utf8(start.name().as_ref())?.to_ascii_lowercase();
        let mut attributes = Vec::new();
        for attr in start.html_attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_ascii_lowercase();
            let value = decode_entities(std::str::from_utf8(&attr.value)?);
            attributes.push((key, value));
        }
        Ok(Self {
            tag,
            attributes,
            children: Vec::new(),
        })
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Stack of open elements; index 0 is the fragment root
struct TreeBuilder {
    stack: Vec<DomElement>,
    max_nesting: usize,
}

impl TreeBuilder {
    fn new(max_nesting: usize) -> Self {
        Self {
            stack: vec![DomElement::default()],
            max_nesting,
        }
    }

    fn open(&mut self, element: DomElement) -> Result<()> {
        self.close_implied(&element.tag);
        if VOID_TAGS.contains(&element.tag.as_str()) {
            self.append(DomNode::Element(element));
            return Ok(());
        }
        if self.stack.len() > self.max_nesting {
            return Err(StoreError::NestingTooDeep(self.max_nesting));
        }
        self.stack.push(element);
        Ok(())
    }

    fn open_empty(&mut self, element: DomElement) {
        self.close_implied(&element.tag);
        self.append(DomNode::Element(element));
    }

    /// Close the innermost open element named `tag` and everything inside
    /// it; stray end tags are ignored
    fn close(&mut self, tag: &str) {
        if let Some(index) = self.stack.iter().rposition(|open| open.tag == tag) {
            if index > 0 {
                self.close_to(index);
            }
        }
    }

    fn close_to(&mut self, index: usize) {
        while self.stack.len() > index.max(1) {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            if let Some(element) = self.stack.pop() {
                self.append(DomNode::Element(element));
            }
        }
    }

    fn append(&mut self, node: DomNode) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    /// Apply implied end tags: a new `li` closes the open item of the same
    /// list, and any block closes an open paragraph
    fn close_implied(&mut self, tag: &str) {
        if tag == "li" {
            for index in (1..self.stack.len()).rev() {
                match self.stack[index].tag.as_str() {
                    "li" => {
                        self.close_to(index);
                        break;
                    }
                    "ul" | "ol" => break,
                    _ => {}
                }
            }
        }
        if BLOCK_TAGS.contains(&tag) {
            for index in (1..self.stack.len()).rev() {
                let open = self.stack[index].tag.as_str();
                if open == "p" {
                    self.close_to(index);
                    break;
                }
                if BLOCK_TAGS.contains(&open) {
                    break;
                }
            }
        }
    }

    fn finish(mut self) -> DomElement {
        self.close_to(1);
        self.stack.pop().unwrap_or_default()
    }
}

// =============================================================================
// HTML Reader
// =============================================================================

/// Parses HTML fragments into documents
#[derive(Debug, Clone)]
pub struct HtmlReader {
    max_nesting: usize,
}

impl HtmlReader {
    /// Create a new HTML reader
    pub fn new() -> Self {
        Self {
            max_nesting: MAX_NESTING,
        }
    }

    /// Parse a fragment. Input without any content yields the canonical
    /// empty document; markup quick-xml cannot tokenize is an error.
    pub fn read(&self, html: &str) -> Result<Document> {
        let root = self.parse_tree(html)?;
        let nodes = convert_children(&root.children, Marks::default());
        let blocks = structure(nodes, ElementKind::Paragraph, true);
        Ok(Document::new(blocks))
    }

    fn parse_tree(&self, html: &str) -> Result<DomElement> {
        let mut reader = Reader::from_str(html);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;

        let mut builder = TreeBuilder::new(self.max_nesting);
        loop {
            match reader.read_event()? {
                Event::Start(e) if !is_tag_name(&e) => builder.append(stray_markup(&e, ">")?),
                Event::Empty(e) if !is_tag_name(&e) => builder.append(stray_markup(&e, "/>")?),
                Event::Start(e) => builder.open(DomElement::from_start(&e)?)?,
                Event::Empty(e) => builder.open_empty(DomElement::from_start(&e)?),
                Event::End(e) => {
                    let tag = std::str::from_utf8(e.name().as_ref())?.to_ascii_lowercase();
                    builder.close(&tag);
                }
                Event::Text(e) => {
                    let text = decode_entities(std::str::from_utf8(&e)?);
                    builder.append(DomNode::Text(text));
                }
                Event::CData(e) => {
                    builder.append(DomNode::Text(std::str::from_utf8(&e)?.to_string()));
                }
                Event::Eof => break,
                // Comments, declarations, doctypes, processing instructions
                _ => {}
            }
        }
        Ok(builder.finish())
    }
}

impl Default for HtmlReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Browsers only open a tag when `<` is directly followed by a letter
fn is_tag_name(start: &BytesStart<'_>) -> bool {
    start.name().as_ref().first().is_some_and(u8::is_ascii_alphabetic)
}

/// A `<...>` run that is not a tag, kept as the text it was written as
fn stray_markup(start: &BytesStart<'_>, close: &str) -> Result<DomNode> {
    let inner = decode_entities(std::str::from_utf8(start)?);
    Ok(DomNode::Text(format!("<{}{}", inner, close)))
}

// =============================================================================
// Tree conversion
// =============================================================================

fn convert_children(children: &[DomNode], marks: Marks) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in children {
        match child {
            DomNode::Text(text) => nodes.push(Text::with_marks(text.as_str(), marks).into()),
            DomNode::Element(element) => nodes.extend(convert_element(element, marks)),
        }
    }
    nodes
}

fn convert_element(element: &DomElement, marks: Marks) -> Vec<Node> {
    let tag = element.tag.as_str();
    if SKIPPED_TAGS.contains(&tag) {
        return Vec::new();
    }
    if let Some(mark) = mark_for_tag(tag) {
        return convert_children(&element.children, marks.with(mark, true));
    }
    if tag == "a" {
        let url = element.attr("href").unwrap_or_default();
        let children = flatten_inline(convert_children(&element.children, marks));
        return vec![Element::link(url, children).into()];
    }
    let Some(kind) = kind_for_tag(tag) else {
        // Transparent wrapper
        return convert_children(&element.children, marks);
    };

    let children = convert_children(&element.children, marks);
    let children = if kind.is_list() {
        structure(children, ElementKind::ListItem, true)
    } else {
        structure(children, ElementKind::Paragraph, false)
    };
    vec![Element {
        kind,
        align: element.attr("style").and_then(text_align),
        children,
    }
    .into()]
}

/// Group inline runs that sit next to blocks (or all inline runs, with
/// `always`) into `run_kind` elements, dropping whitespace-only runs
fn structure(children: Vec<Node>, run_kind: ElementKind, always: bool) -> Vec<Node> {
    if !always && children.iter().all(Node::is_inline) {
        return children;
    }

    let mut out = Vec::with_capacity(children.len());
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if child.is_inline() {
            run.push(child);
        } else {
            flush_run(&mut run, &run_kind, &mut out);
            out.push(child);
        }
    }
    flush_run(&mut run, &run_kind, &mut out);
    out
}

fn flush_run(run: &mut Vec<Node>, run_kind: &ElementKind, out: &mut Vec<Node>) {
    let whitespace_only = run
        .iter()
        .all(|node| matches!(node, Node::Text(text) if text.text.trim().is_empty()));
    let nodes = std::mem::take(run);
    if !whitespace_only {
        out.push(Element::new(run_kind.clone(), nodes).into());
    }
}

/// Links hold inline content only; nested blocks and links give up their
/// text
fn flatten_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(_) => out.push(node),
            Node::Element(element) => out.extend(flatten_inline(element.children)),
        }
    }
    out
}

/// Alignment from an inline `style` attribute
fn text_align(style: &str) -> Option<Alignment> {
    static TEXT_ALIGN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = TEXT_ALIGN
        .get_or_init(|| Regex::new(r"(?i)(?:^|;)\s*text-align\s*:\s*([a-z]+)\s*(?:;|$)").ok())
        .as_ref()?;
    let value = pattern.captures(style)?.get(1)?.as_str();
    Alignment::parse(value)
}

// =============================================================================
// Entity decoding
// =============================================================================

/// Decode numeric and HTML5 named references, keeping unknown or
/// unterminated ones verbatim
fn decode_entities(raw: &str) -> String {
    if let Ok(text) = unescape_with(raw, resolve_html5_entity) {
        return text.into_owned();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| Some((end, unescape_with(&tail[..=end], resolve_html5_entity).ok()?)));
        match decoded {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
