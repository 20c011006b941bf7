//! Core node types: elements, element kinds, and alignment

use crate::Text;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment of a block-level element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// CSS keyword for this alignment
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Parse a CSS `text-align` value; anything but left/center/right is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

/// The closed set of element kinds
///
/// `Link` is the only inline kind and the only one with a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading-1")]
    HeadingOne,
    #[serde(rename = "heading-2")]
    HeadingTwo,
    #[serde(rename = "block-quote")]
    BlockQuote,
    #[serde(rename = "bulleted-list")]
    BulletedList,
    #[serde(rename = "numbered-list")]
    NumberedList,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "link")]
    Link { url: String },
}

impl ElementKind {
    /// Create a link kind
    pub fn link(url: impl Into<String>) -> Self {
        ElementKind::Link { url: url.into() }
    }

    /// Check if this kind is inline (only links are)
    pub fn is_inline(&self) -> bool {
        matches!(self, ElementKind::Link { .. })
    }

    /// Check if this kind is a list container
    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::BulletedList | ElementKind::NumberedList)
    }

    /// Stable name used in logs and the JSON form
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::HeadingOne => "heading-1",
            ElementKind::HeadingTwo => "heading-2",
            ElementKind::BlockQuote => "block-quote",
            ElementKind::BulletedList => "bulleted-list",
            ElementKind::NumberedList => "numbered-list",
            ElementKind::ListItem => "list-item",
            ElementKind::Link { .. } => "link",
        }
    }
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Alignment; only meaningful on block-level kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with the given kind and children
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            align: None,
            children,
        }
    }

    /// Create a paragraph
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(ElementKind::Paragraph, children)
    }

    /// Create a link wrapping the given inline children
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(ElementKind::link(url), children)
    }

    /// Set the alignment (builder style)
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    /// A text block is a block-level element whose children are all inline
    pub fn is_text_block(&self) -> bool {
        !self.is_inline() && self.children.iter().all(Node::is_inline)
    }

    /// The link URL, if this is a link
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Link { url } => Some(url),
            _ => None,
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    /// Shorthand for a plain text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Text leaves and inline elements are inline
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Element(element) => element.is_inline(),
        }
    }

    /// Length of all descendant text in grapheme clusters
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(text) => text.len(),
            Node::Element(element) => element.children.iter().map(Node::text_len).sum(),
        }
    }

    /// Concatenated descendant text
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            Node::Element(element) => element.children.iter().map(Node::plain_text).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}
