//! Block lifting and list wrapping used by the block-type toggle
//!
//! Every operation keeps the number and order of text blocks, so a
//! selection can be carried across them by block ordinal.

use crate::{EditError, Result};
use doc_model::{common_prefix, Document, Element, ElementKind, Node, Path};

fn vanished(path: &[usize]) -> EditError {
    EditError::ExecutionFailed(format!("No block to lift at {:?}", path))
}

/// Depth of the outermost list enclosing the block at `path`
fn outermost_list_depth(document: &Document, path: &[usize]) -> Option<usize> {
    (1..path.len()).find(|&depth| {
        document
            .element(&path[..depth])
            .is_some_and(|element| element.kind.is_list())
    })
}

/// Split `element` around the descendant at `relative`.
///
/// Returns the part before the descendant, the descendant itself and the
/// part after. Both parts keep the kind and alignment of `element` and are
/// `None` when they would be empty.
fn split_around(element: Element, relative: &[usize]) -> Result<(Option<Element>, Node, Option<Element>)> {
    let Some((&index, rest)) = relative.split_first() else {
        return Err(vanished(relative));
    };
    let Element { kind, align, mut children } = element;
    if index >= children.len() {
        return Err(vanished(relative));
    }

    let mut after = children.split_off(index + 1);
    let target = children.pop().ok_or_else(|| vanished(relative))?;
    let mut before = children;

    let block = if rest.is_empty() {
        target
    } else {
        let Node::Element(inner) = target else {
            return Err(vanished(relative));
        };
        let (inner_before, block, inner_after) = split_around(inner, rest)?;
        before.extend(inner_before.map(Node::from));
        if let Some(inner_after) = inner_after {
            after.insert(0, inner_after.into());
        }
        block
    };

    let half = |children: Vec<Node>| {
        (!children.is_empty()).then(|| Element {
            kind: kind.clone(),
            align,
            children,
        })
    };
    Ok((half(before), block, half(after)))
}

/// Move the block at `path` up until it is a child of `path[..depth]`.
///
/// Every ancestor in between is split into the part before the block and
/// the part after it. Returns the block's new path.
pub(crate) fn lift_block(document: &mut Document, path: &[usize], depth: usize) -> Result<Path> {
    if path.len() <= depth + 1 {
        return Ok(path.to_vec());
    }
    let container = &path[..depth];
    let index = path[depth];
    let siblings = document.children_mut(container).ok_or_else(|| vanished(path))?;
    if !matches!(siblings.get(index), Some(Node::Element(_))) {
        return Err(vanished(path));
    }
    let Node::Element(ancestor) = siblings.remove(index) else {
        return Err(vanished(path));
    };

    let (before, block, after) = split_around(ancestor, &path[depth + 1..])?;
    let mut new_index = index;
    let mut replacement = Vec::with_capacity(3);
    if let Some(before) = before {
        replacement.push(before.into());
        new_index += 1;
    }
    replacement.push(block);
    replacement.extend(after.map(Node::from));
    siblings.splice(index..index, replacement);

    let mut new_path = container.to_vec();
    new_path.push(new_index);
    Ok(new_path)
}

/// Lift the given text blocks out of every list enclosing them.
///
/// `blocks` are text-block paths in document order. Each list holding one
/// of them is split around it; the outer parts keep the list's kind and
/// alignment.
pub(crate) fn unwrap_lists(document: &mut Document, blocks: &[Path]) -> Result<()> {
    // Latest first, so the paths still pending stay valid
    for path in blocks.iter().rev() {
        if let Some(depth) = outermost_list_depth(document, path) {
            lift_block(document, path, depth - 1)?;
        }
    }
    Ok(())
}

/// Wrap the given text blocks in a single new list.
///
/// `blocks` are consecutive text-block paths in document order, none of
/// them inside a list. Blocks nested deeper than their common container
/// are lifted to it first, so the wrapped range is a run of siblings.
pub(crate) fn wrap_in_list(document: &mut Document, blocks: &[Path], kind: ElementKind) -> Result<()> {
    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        return Ok(());
    };
    let mut container = common_prefix(first, last);
    if container.len() == first.len() {
        container.pop();
    }
    let depth = container.len();

    let mut start = None;
    for path in blocks.iter().rev() {
        start = Some(lift_block(document, path, depth)?);
    }
    let start = start.and_then(|path| path.get(depth).copied()).ok_or_else(|| vanished(first))?;
    let end = start + blocks.len() - 1;

    let siblings = document
        .children_mut(&container)
        .ok_or_else(|| EditError::ExecutionFailed("Wrap target vanished".to_string()))?;
    let in_range = siblings.get(start..=end).is_some_and(|nodes| {
        nodes
            .iter()
            .all(|node| node.as_element().is_some_and(Element::is_text_block))
    });
    if !in_range {
        return Err(EditError::ExecutionFailed(format!(
            "Cannot wrap {:?}..{:?} in a list",
            first, last
        )));
    }
    let items: Vec<Node> = siblings.drain(start..=end).collect();
    siblings.insert(start, Element::new(kind, items).into());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> Node {
        Element::new(ElementKind::ListItem, vec![Node::text(text)]).into()
    }

    fn list(kind: ElementKind, items: &[&str]) -> Node {
        Element::new(kind, items.iter().map(|t| item(t)).collect()).into()
    }

    fn para(text: &str) -> Node {
        Element::paragraph(vec![Node::text(text)]).into()
    }

    fn kinds(doc: &Document) -> Vec<&'static str> {
        doc.children
            .iter()
            .map(|n| n.as_element().unwrap().kind.name())
            .collect()
    }

    #[test]
    fn test_unwrap_middle_item_splits_list() {
        let mut doc = Document::new(vec![list(ElementKind::BulletedList, &["a", "b", "c"])]);
        unwrap_lists(&mut doc, &[vec![0, 1]]).unwrap();

        assert_eq!(doc.children.len(), 3);
        assert_eq!(doc.element(&[0]).unwrap().kind, ElementKind::BulletedList);
        assert_eq!(doc.element(&[1]).unwrap().kind, ElementKind::ListItem);
        assert_eq!(doc.element(&[2]).unwrap().kind, ElementKind::BulletedList);
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_unwrap_across_two_lists() {
        let mut doc = Document::new(vec![
            list(ElementKind::BulletedList, &["a", "b"]),
            para("mid"),
            list(ElementKind::NumberedList, &["c", "d"]),
        ]);
        unwrap_lists(&mut doc, &[vec![0, 1], vec![1], vec![2, 0]]).unwrap();

        assert_eq!(
            kinds(&doc),
            vec!["bulleted-list", "list-item", "paragraph", "list-item", "numbered-list"]
        );
    }

    #[test]
    fn test_unwrap_paragraph_inside_nested_item() {
        // <ul><li><p>a</p><ul><li>b</li></ul></li></ul>
        let inner = list(ElementKind::BulletedList, &["b"]);
        let outer_item = Element::new(ElementKind::ListItem, vec![para("a"), inner]);
        let mut doc = Document::new(vec![Element::new(ElementKind::BulletedList, vec![outer_item.into()]).into()]);
        assert_eq!(doc.text_blocks(), vec![vec![0, 0, 0], vec![0, 0, 1, 0]]);

        unwrap_lists(&mut doc, &[vec![0, 0, 0]]).unwrap();

        assert_eq!(kinds(&doc), vec!["paragraph", "bulleted-list"]);
        assert_eq!(doc.text_blocks(), vec![vec![0], vec![1, 0, 0, 0]]);
        assert_eq!(doc.plain_text(), "a\nb");
    }

    #[test]
    fn test_lift_keeps_ancestor_halves() {
        let quote = Element::new(ElementKind::BlockQuote, vec![para("a"), para("b"), para("c")]);
        let mut doc = Document::new(vec![quote.into()]);

        let lifted = lift_block(&mut doc, &[0, 1], 0).unwrap();

        assert_eq!(lifted, vec![1]);
        assert_eq!(kinds(&doc), vec!["block-quote", "paragraph", "block-quote"]);
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_wrap_sibling_range() {
        let mut doc = Document::new(vec![para("a"), para("b"), para("c")]);
        wrap_in_list(&mut doc, &[vec![0], vec![1]], ElementKind::NumberedList).unwrap();
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.text_blocks(), vec![vec![0, 0], vec![0, 1], vec![1]]);
    }

    #[test]
    fn test_wrap_blocks_at_different_depths() {
        let quote = Element::new(ElementKind::BlockQuote, vec![para("b"), para("c")]);
        let mut doc = Document::new(vec![para("a"), quote.into()]);

        wrap_in_list(&mut doc, &[vec![0], vec![1, 0]], ElementKind::BulletedList).unwrap();

        assert_eq!(kinds(&doc), vec!["bulleted-list", "block-quote"]);
        assert_eq!(doc.text_blocks(), vec![vec![0, 0], vec![0, 1], vec![1, 0]]);
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }
}
