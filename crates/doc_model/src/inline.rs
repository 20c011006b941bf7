//! Inline-content helpers for text blocks
//!
//! Offsets are grapheme offsets into the concatenated text of a block,
//! counting text nested inside links.

use crate::{Element, Marks, Node, Text};

/// An inline element child of a text block with the text range it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    /// Index among the block's children
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl InlineSpan {
    /// Check if `[from, to)` overlaps this span; a caret must lie strictly
    /// inside it.
    pub fn intersects(&self, from: usize, to: usize) -> bool {
        if from == to {
            self.start < from && from < self.end
        } else {
            self.start < to && from < self.end
        }
    }
}

impl Element {
    /// Total text length in grapheme clusters
    pub fn text_len(&self) -> usize {
        self.children.iter().map(Node::text_len).sum()
    }

    /// Concatenated text of all descendants
    pub fn text(&self) -> String {
        self.children.iter().map(Node::plain_text).collect()
    }

    /// Visit every text leaf with its start offset
    pub fn leaves(&self) -> Vec<(usize, &Text)> {
        let mut out = Vec::new();
        collect_leaves(&self.children, 0, &mut out);
        out
    }

    /// Visit every text leaf mutably with its start offset
    pub fn for_each_leaf_mut(&mut self, mut f: impl FnMut(usize, &mut Text)) {
        visit_leaves_mut(&mut self.children, 0, &mut f);
    }

    /// Ensure a leaf boundary exists at `offset`, splitting a text leaf if needed.
    /// Inline elements are descended into but never split themselves.
    pub fn split_leaf_at(&mut self, offset: usize) {
        split_children_at(&mut self.children, offset);
    }

    /// Direct inline-element children (links) with their ranges
    pub fn inline_spans(&self) -> Vec<InlineSpan> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (index, child) in self.children.iter().enumerate() {
            let len = child.text_len();
            if matches!(child, Node::Element(e) if e.is_inline()) {
                spans.push(InlineSpan {
                    index,
                    start,
                    end: start + len,
                });
            }
            start += len;
        }
        spans
    }

    /// Marks in effect at a caret offset: those of the leaf ending at or
    /// spanning the offset, or of the first leaf at offset zero.
    pub fn marks_at(&self, offset: usize) -> Marks {
        let leaves = self.leaves();
        leaves
            .iter()
            .find(|(start, text)| *start < offset && offset <= start + text.len())
            .or_else(|| leaves.first())
            .map(|(_, text)| text.marks)
            .unwrap_or_default()
    }

    /// Insert text at an offset.
    ///
    /// With `marks` set and different from the surrounding leaf, a new leaf
    /// is created; otherwise the text joins the leaf at the caret.
    pub fn insert_text(&mut self, offset: usize, text: &str, marks: Option<Marks>) {
        let marks = marks.unwrap_or_else(|| self.marks_at(offset));
        self.split_leaf_at(offset);
        if !insert_into_children(&mut self.children, offset, text, marks) {
            self.children.push(Text::with_marks(text, marks).into());
        }
    }

    /// Remove the text in `[from, to)`, dropping inline elements left empty
    pub fn remove_range(&mut self, from: usize, to: usize) {
        if from >= to {
            return;
        }
        self.split_leaf_at(from);
        self.split_leaf_at(to);
        remove_from_children(&mut self.children, 0, from, to);
    }

    /// Split the inline content at `offset`, returning the tail.
    /// Inline elements straddling the offset are split into two copies.
    pub fn split_children_off(&mut self, offset: usize) -> Vec<Node> {
        split_off_children(&mut self.children, offset)
    }
}

fn collect_leaves<'a>(children: &'a [Node], mut start: usize, out: &mut Vec<(usize, &'a Text)>) {
    for child in children {
        match child {
            Node::Text(text) => {
                out.push((start, text));
                start += text.len();
            }
            Node::Element(element) => {
                collect_leaves(&element.children, start, out);
                start += element.text_len();
            }
        }
    }
}

fn visit_leaves_mut(children: &mut [Node], mut start: usize, f: &mut impl FnMut(usize, &mut Text)) {
    for child in children.iter_mut() {
        let len = child.text_len();
        match child {
            Node::Text(text) => f(start, text),
            Node::Element(element) => visit_leaves_mut(&mut element.children, start, f),
        }
        start += len;
    }
}

fn split_children_at(children: &mut Vec<Node>, offset: usize) {
    let mut start = 0;
    for index in 0..children.len() {
        let len = children[index].text_len();
        if offset > start && offset < start + len {
            match &mut children[index] {
                Node::Text(text) => {
                    let tail = text.split_off(offset - start);
                    children.insert(index + 1, tail.into());
                }
                Node::Element(element) => split_children_at(&mut element.children, offset - start),
            }
            return;
        }
        start += len;
    }
}

/// Insert into the leaf ending exactly at `offset` when its marks match,
/// else place a new leaf at that boundary. Returns false when no boundary
/// was found (empty children).
fn insert_into_children(children: &mut Vec<Node>, offset: usize, text: &str, marks: Marks) -> bool {
    let mut start = 0;
    for index in 0..children.len() {
        let len = children[index].text_len();
        let end = start + len;
        match &mut children[index] {
            Node::Text(leaf) if leaf.marks == marks && start <= offset && offset <= end => {
                leaf.insert_str(offset - start, text);
                return true;
            }
            Node::Element(element) if start < offset && offset <= end => {
                if insert_into_children(&mut element.children, offset - start, text, marks) {
                    return true;
                }
            }
            _ => {}
        }
        if offset == start {
            children.insert(index, Text::with_marks(text, marks).into());
            return true;
        }
        if offset == end && index + 1 == children.len() {
            children.push(Text::with_marks(text, marks).into());
            return true;
        }
        start = end;
    }
    false
}

fn remove_from_children(children: &mut Vec<Node>, base: usize, from: usize, to: usize) {
    let mut start = base;
    let mut kept = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        let len = child.text_len();
        let end = start + len;
        let keep = match &mut child {
            Node::Text(_) => !(len > 0 && start >= from && end <= to),
            Node::Element(element) => {
                if start < to && from < end {
                    remove_from_children(&mut element.children, start, from, to);
                    !element.children.is_empty()
                } else {
                    true
                }
            }
        };
        if keep {
            kept.push(child);
        }
        start = end;
    }
    *children = kept;
}

fn split_off_children(children: &mut Vec<Node>, offset: usize) -> Vec<Node> {
    let mut start = 0;
    for index in 0..children.len() {
        let len = children[index].text_len();
        let end = start + len;
        if offset <= start {
            return children.split_off(index);
        }
        if offset < end {
            let mut tail = children.split_off(index + 1);
            let head = match &mut children[index] {
                Node::Text(text) => Node::Text(text.split_off(offset - start)),
                Node::Element(element) => {
                    let rest = split_off_children(&mut element.children, offset - start);
                    Node::Element(Element {
                        kind: element.kind.clone(),
                        align: element.align,
                        children: rest,
                    })
                }
            };
            tail.insert(0, head);
            return tail;
        }
        start = end;
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    fn block() -> Element {
        Element::paragraph(vec![
            Node::text("Body "),
            Element::link("https://x.com", vec![Node::text("link")]).into(),
            Text::new(" end").mark(Mark::Bold).into(),
        ])
    }

    #[test]
    fn test_leaves_and_len() {
        let para = block();
        assert_eq!(para.text_len(), 13);
        let starts: Vec<usize> = para.leaves().iter().map(|(s, _)| *s).collect();
        assert_eq!(starts, vec![0, 5, 9]);
    }

    #[test]
    fn test_split_leaf_inside_link() {
        let mut para = block();
        para.split_leaf_at(7);
        let link = para.children[1].as_element().unwrap();
        assert_eq!(link.children.len(), 2);
        assert_eq!(para.children.len(), 3);
        assert_eq!(para.text(), "Body link end");
    }

    #[test]
    fn test_marks_at() {
        let para = block();
        assert!(para.marks_at(10).bold);
        assert!(!para.marks_at(9).bold);
        assert!(!para.marks_at(0).bold);
    }

    #[test]
    fn test_insert_text_with_new_marks() {
        let mut para = Element::paragraph(vec![Node::text("ab")]);
        para.insert_text(1, "X", Some(Marks::only(Mark::Italic)));
        assert_eq!(para.children.len(), 3);
        assert_eq!(para.text(), "aXb");
        assert!(para.children[1].as_text().unwrap().has_mark(Mark::Italic));
    }

    #[test]
    fn test_insert_text_into_empty_block() {
        let mut para = Element::paragraph(vec![Node::text("")]);
        para.insert_text(0, "hi", None);
        assert_eq!(para.text(), "hi");
    }

    #[test]
    fn test_remove_range_drops_emptied_link() {
        let mut para = block();
        para.remove_range(3, 10);
        assert_eq!(para.text(), "Bodend");
        assert!(para.inline_spans().is_empty());
    }

    #[test]
    fn test_split_children_off_splits_link() {
        let mut para = block();
        let tail = para.split_children_off(7);
        assert_eq!(para.text(), "Body li");
        let tail_block = Element::paragraph(tail);
        assert_eq!(tail_block.text(), "nk end");
        assert_eq!(tail_block.children[0].as_element().unwrap().url(), Some("https://x.com"));
    }
}
