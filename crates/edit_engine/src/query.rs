//! Active-state queries shared by commands and the toolbar
//!
//! Every query is a pure function of the document and selection.

use crate::BlockFormat;
use doc_model::{Alignment, Document, Element, Mark, Marks, Position, Selection};

/// Marks at a caret position
pub fn marks_at(document: &Document, position: &Position) -> Marks {
    document
        .element(&position.path)
        .map(|block| block.marks_at(position.offset))
        .unwrap_or_default()
}

/// True when every text leaf intersecting the selection carries `mark`.
///
/// A collapsed selection reports the marks at the caret.
pub fn is_mark_active(document: &Document, selection: &Selection, mark: Mark) -> bool {
    if selection.is_collapsed() {
        return marks_at(document, &selection.focus).has(mark);
    }

    let mut seen = false;
    for (path, from, to) in document.blocks_in_selection(selection) {
        let Some(block) = document.element(&path) else {
            continue;
        };
        for (start, leaf) in block.leaves() {
            let end = start + leaf.len();
            if leaf.is_empty() || end <= from || start >= to {
                continue;
            }
            if !leaf.has_mark(mark) {
                return false;
            }
            seen = true;
        }
    }
    seen
}

/// Nearest enclosing text block of the selection start
fn nearest_block<'a>(document: &'a Document, selection: &Selection) -> Option<&'a Element> {
    document.element(&selection.start().path)
}

/// Nearest list enclosing the block at `path`
fn nearest_list<'a>(document: &'a Document, path: &[usize]) -> Option<&'a Element> {
    (1..path.len())
        .rev()
        .filter_map(|depth| document.element(&path[..depth]))
        .find(|element| element.kind.is_list())
}

/// True when the nearest enclosing block already has the target format.
/// For lists, the nearest list enclosing that block must match.
pub fn is_block_active(document: &Document, selection: &Selection, format: BlockFormat) -> bool {
    let path = &selection.start().path;
    let Some(block) = nearest_block(document, selection) else {
        return false;
    };
    if format.is_list() {
        nearest_list(document, path).is_some_and(|list| list.kind == format.kind())
    } else {
        block.kind == format.kind()
    }
}

/// True when the nearest enclosing block is aligned to `align`
pub fn is_align_active(document: &Document, selection: &Selection, align: Alignment) -> bool {
    nearest_block(document, selection).is_some_and(|block| block.align == Some(align))
}

/// True when any link intersects the selection
pub fn is_link_active(document: &Document, selection: &Selection) -> bool {
    document
        .blocks_in_selection(selection)
        .into_iter()
        .any(|(path, from, to)| {
            document.element(&path).is_some_and(|block| {
                block
                    .inline_spans()
                    .iter()
                    .any(|span| is_link_child(block, span.index) && span.intersects(from, to))
            })
        })
}

pub(crate) fn is_link_child(block: &Element, index: usize) -> bool {
    block
        .children
        .get(index)
        .and_then(|child| child.as_element())
        .is_some_and(|element| element.url().is_some())
}
