//! Hyperlink commands for inserting and removing links

use crate::command::check_selection;
use crate::query::is_link_child;
use crate::{Command, CommandResult, EditError, Result};
use doc_model::{grapheme_len, Document, Element, Node, Position, Selection};
use serde::{Deserialize, Serialize};

// =============================================================================
// Helpers
// =============================================================================

/// Replace every link intersecting `[from, to)` with its children.
/// Returns true if anything was unwrapped.
fn unwrap_links(block: &mut Element, from: usize, to: usize) -> bool {
    let spans: Vec<usize> = block
        .inline_spans()
        .into_iter()
        .filter(|span| is_link_child(block, span.index) && span.intersects(from, to))
        .map(|span| span.index)
        .collect();
    for &index in spans.iter().rev() {
        if let Node::Element(link) = block.children.remove(index) {
            block.children.splice(index..index, link.children);
        }
    }
    !spans.is_empty()
}

/// Index of the first child starting at or after `offset`
fn boundary_index(block: &Element, offset: usize) -> usize {
    let mut start = 0;
    for (index, child) in block.children.iter().enumerate() {
        if start >= offset {
            return index;
        }
        start += child.text_len();
    }
    block.children.len()
}

// =============================================================================
// Insert Link Command
// =============================================================================

/// Insert a link at the caret or wrap the selected text in one
///
/// Links already intersecting the selection are unwrapped first. At a
/// caret, `text` becomes the link text and must not be empty; with an
/// expanded selection the selected text is used and `text` is ignored.
/// The selection ends collapsed after the link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertLink {
    pub url: String,
    pub text: String,
}

impl InsertLink {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    /// Wrap an expanded selection; no link text is needed
    pub fn wrap(url: impl Into<String>) -> Self {
        Self::new(url, String::new())
    }
}

impl Command for InsertLink {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;
        let url = self.url.trim();
        if url.is_empty() {
            return Err(EditError::InvalidCommand("Link URL cannot be empty".to_string()));
        }

        let mut new_doc = document.clone();

        if selection.is_collapsed() {
            if self.text.is_empty() {
                return Err(EditError::InvalidCommand(
                    "Link text is required to insert at the caret".to_string(),
                ));
            }
            let caret = &selection.focus;
            let block = new_doc.text_block_mut(&caret.path)?;
            unwrap_links(block, caret.offset, caret.offset);
            block.split_leaf_at(caret.offset);
            let index = boundary_index(block, caret.offset);
            block
                .children
                .insert(index, Element::link(url, vec![Node::text(self.text.as_str())]).into());

            let new_selection = Selection::collapsed(Position::new(
                caret.path.clone(),
                caret.offset + grapheme_len(&self.text),
            ));
            return Ok(CommandResult::edited(document, selection, new_doc, new_selection));
        }

        let ranges = document.blocks_in_selection(selection);
        if ranges.iter().all(|(_, from, to)| from == to) {
            return Err(EditError::InvalidSelection("Selection covers no text to link".to_string()));
        }
        for (path, from, to) in ranges {
            if from == to {
                continue;
            }
            let block = new_doc.text_block_mut(&path)?;
            unwrap_links(block, from, to);
            block.split_leaf_at(from);
            block.split_leaf_at(to);
            let first = boundary_index(block, from);
            let last = boundary_index(block, to);
            let wrapped: Vec<Node> = block.children.drain(first..last).collect();
            block.children.insert(first, Element::link(url, wrapped).into());
        }

        Ok(CommandResult::edited(document, selection, new_doc, selection.collapse_to_end()))
    }

    fn display_name(&self) -> &str {
        "Insert Link"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Remove Link Command
// =============================================================================

/// Unwrap every link intersecting the selection, keeping its text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveLink;

impl RemoveLink {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RemoveLink {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;

        let mut new_doc = document.clone();
        let mut removed = false;
        for (path, from, to) in document.blocks_in_selection(selection) {
            removed |= unwrap_links(new_doc.text_block_mut(&path)?, from, to);
        }
        if !removed {
            return Err(EditError::InvalidCommand("No link in selection".to_string()));
        }

        Ok(CommandResult::edited(document, selection, new_doc, selection.clone()))
    }

    fn display_name(&self) -> &str {
        "Remove Link"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
