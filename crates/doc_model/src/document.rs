//! Document root, path access, and normalization

use crate::{DocModelError, Element, Node, Path, Position, Result, Selection, Text};
use serde::{Deserialize, Serialize};

/// A rich-text document: an ordered sequence of block nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Create a normalized document from block nodes
    pub fn new(children: Vec<Node>) -> Self {
        let mut document = Self { children };
        document.normalize();
        document
    }

    /// The canonical empty document: one paragraph holding one empty text leaf
    pub fn empty() -> Self {
        Self {
            children: vec![Element::paragraph(vec![Text::default().into()]).into()],
        }
    }

    /// Check if this is the canonical empty document
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Parse the JSON form (`[{"type": "paragraph", "children": [...]}, ...]`)
    pub fn from_json(json: &str) -> Result<Self> {
        let children: Vec<Node> = serde_json::from_str(json)?;
        Ok(Self::new(children))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Get the node at a path
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for &index in rest {
            node = node.as_element()?.children.get(index)?;
        }
        Some(node)
    }

    /// Get the node at a path mutably
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &index in rest {
            node = node.as_element_mut()?.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Get the element at a path
    pub fn element(&self, path: &[usize]) -> Option<&Element> {
        self.node(path)?.as_element()
    }

    /// Get the element at a path mutably
    pub fn element_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        self.node_mut(path)?.as_element_mut()
    }

    /// Children of the node at `parent`; the empty path is the root
    pub fn children_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Node>> {
        if parent.is_empty() {
            Some(&mut self.children)
        } else {
            Some(&mut self.element_mut(parent)?.children)
        }
    }

    /// Paths of all text blocks in document order
    pub fn text_blocks(&self) -> Vec<Path> {
        let mut blocks = Vec::new();
        let mut path = Vec::new();
        collect_text_blocks(&self.children, &mut path, &mut blocks);
        blocks
    }

    /// Get the text block at a path, failing if the path names anything else
    pub fn text_block(&self, path: &[usize]) -> Result<&Element> {
        let element = self
            .element(path)
            .ok_or_else(|| DocModelError::NodeNotFound(path.to_vec()))?;
        if element.is_text_block() {
            Ok(element)
        } else {
            Err(DocModelError::NotATextBlock(path.to_vec()))
        }
    }

    /// Get the text block at a path mutably
    pub fn text_block_mut(&mut self, path: &[usize]) -> Result<&mut Element> {
        self.text_block(path)?;
        self.element_mut(path)
            .ok_or_else(|| DocModelError::NodeNotFound(path.to_vec()))
    }

    /// Position at the start of the first text block
    pub fn start(&self) -> Position {
        let path = self.text_blocks().into_iter().next().unwrap_or_else(|| vec![0]);
        Position::start_of(path)
    }

    /// Position at the end of the last text block
    pub fn end(&self) -> Position {
        match self.text_blocks().pop() {
            Some(path) => {
                let offset = self.element(&path).map(Element::text_len).unwrap_or(0);
                Position::new(path, offset)
            }
            None => Position::start_of(vec![0]),
        }
    }

    /// Check that a position names a text block and lies within its text
    pub fn validate_position(&self, position: &Position) -> Result<()> {
        let block = self.text_block(&position.path)?;
        if position.offset > block.text_len() {
            return Err(DocModelError::InvalidPosition {
                path: position.path.clone(),
                offset: position.offset,
            });
        }
        Ok(())
    }

    /// Check both endpoints of a selection
    pub fn validate_selection(&self, selection: &Selection) -> Result<()> {
        self.validate_position(&selection.anchor)?;
        self.validate_position(&selection.focus)
    }

    /// Text blocks touched by a selection, each with the selected `[from, to)` range
    pub fn blocks_in_selection(&self, selection: &Selection) -> Vec<(Path, usize, usize)> {
        let start = selection.start();
        let end = selection.end();
        self.text_blocks()
            .into_iter()
            .filter(|path| *path >= start.path && *path <= end.path)
            .filter_map(|path| {
                let len = self.element(&path)?.text_len();
                let from = if path == start.path { start.offset.min(len) } else { 0 };
                let to = if path == end.path { end.offset.min(len) } else { len };
                Some((path, from, to))
            })
            .collect()
    }

    /// Plain text with one line per text block
    pub fn plain_text(&self) -> String {
        self.text_blocks()
            .iter()
            .filter_map(|path| self.element(path))
            .map(Element::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Restore the structural invariants.
    ///
    /// Adjacent text leaves with identical marks merge, empty leaves with
    /// siblings are dropped, childless elements receive an empty leaf, and
    /// a document without blocks becomes the canonical empty document.
    /// Text-block paths and offsets are unaffected.
    pub fn normalize(&mut self) {
        normalize_children(&mut self.children);
        if self.text_blocks().is_empty() {
            *self = Self::empty();
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

fn collect_text_blocks(children: &[Node], path: &mut Path, blocks: &mut Vec<Path>) {
    for (index, child) in children.iter().enumerate() {
        if let Node::Element(element) = child {
            if element.is_inline() {
                continue;
            }
            path.push(index);
            if element.is_text_block() {
                blocks.push(path.clone());
            } else {
                collect_text_blocks(&element.children, path, blocks);
            }
            path.pop();
        }
    }
}

fn normalize_children(children: &mut Vec<Node>) {
    for child in children.iter_mut() {
        if let Node::Element(element) = child {
            normalize_children(&mut element.children);
            if element.children.is_empty() {
                element.children.push(Text::default().into());
            }
        }
    }

    let is_empty_leaf = |node: &Node| matches!(node, Node::Text(text) if text.is_empty());
    if children.len() > 1 && !children.iter().all(is_empty_leaf) {
        children.retain(|node| !is_empty_leaf(node));
    }

    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let (Some(Node::Text(last)), Node::Text(next)) = (merged.last_mut(), &child) {
            if last.marks == next.marks {
                last.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(child);
    }
    if merged.len() > 1 && merged.iter().all(is_empty_leaf) {
        merged.truncate(1);
    }
    *children = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, Mark, Marks};
    use proptest::prelude::*;

    fn sample() -> Document {
        Document::new(vec![
            Element::new(ElementKind::HeadingOne, vec![Node::text("Title")]).into(),
            Element::new(
                ElementKind::BulletedList,
                vec![
                    Element::new(ElementKind::ListItem, vec![Node::text("one")]).into(),
                    Element::new(ElementKind::ListItem, vec![Node::text("two")]).into(),
                ],
            )
            .into(),
            Element::paragraph(vec![Node::text("tail")]).into(),
        ])
    }

    #[test]
    fn test_empty_document_is_canonical() {
        let doc = Document::new(Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.text_blocks(), vec![vec![0]]);
    }

    #[test]
    fn test_text_blocks_in_order() {
        let doc = sample();
        assert_eq!(doc.text_blocks(), vec![vec![0], vec![1, 0], vec![1, 1], vec![2]]);
        assert_eq!(doc.plain_text(), "Title\none\ntwo\ntail");
    }

    #[test]
    fn test_normalize_merges_and_fills() {
        let doc = Document::new(vec![
            Element::paragraph(vec![
                Node::text("a"),
                Node::text("b"),
                Text::new("").mark(Mark::Bold).into(),
                Text::new("c").mark(Mark::Bold).into(),
            ])
            .into(),
            Element::paragraph(Vec::new()).into(),
        ]);
        let first = doc.element(&[0]).unwrap();
        assert_eq!(first.children, vec![Node::text("ab"), Text::new("c").mark(Mark::Bold).into()]);
        let second = doc.element(&[1]).unwrap();
        assert_eq!(second.children, vec![Node::text("")]);
    }

    #[test]
    fn test_blocks_in_selection() {
        let doc = sample();
        let selection = Selection::new(Position::new(vec![2], 2), Position::new(vec![1, 0], 1));
        let blocks = doc.blocks_in_selection(&selection);
        assert_eq!(
            blocks,
            vec![(vec![1, 0], 1, 3), (vec![1, 1], 0, 3), (vec![2], 0, 2)]
        );
    }

    #[test]
    fn test_validate_position() {
        let doc = sample();
        assert!(doc.validate_position(&Position::new(vec![1, 1], 3)).is_ok());
        assert!(matches!(
            doc.validate_position(&Position::new(vec![1], 0)),
            Err(DocModelError::NotATextBlock(_))
        ));
        assert!(matches!(
            doc.validate_position(&Position::new(vec![0], 9)),
            Err(DocModelError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }

    fn leaf() -> impl Strategy<Value = Node> {
        ("[ab]{0,2}", any::<bool>(), any::<bool>()).prop_map(|(text, bold, italic)| {
            Text::with_marks(text, Marks { bold, italic, ..Marks::default() }).into()
        })
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(leaves in prop::collection::vec(leaf(), 0..8)) {
            let doc = Document::new(vec![Element::paragraph(leaves).into()]);
            let mut again = doc.clone();
            again.normalize();
            prop_assert_eq!(again, doc);
        }
    }
}
