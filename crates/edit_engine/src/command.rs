//! Command system for document editing

use crate::{EditError, Result};
use doc_model::{grapheme_len, Document, Element, ElementKind, Marks, Path, Position, Selection};
use serde::{Deserialize, Serialize};

/// Result of applying a command
#[derive(Debug)]
pub struct CommandResult {
    /// The new document after the command
    pub document: Document,
    /// The new selection after the command
    pub selection: Selection,
    /// The inverse command (for undo)
    pub inverse: Box<dyn Command>,
}

impl CommandResult {
    /// Normalize the edited document and pair it with a snapshot inverse
    /// that restores `before` and `before_selection`.
    pub fn edited(
        before: &Document,
        before_selection: &Selection,
        mut document: Document,
        selection: Selection,
    ) -> Self {
        document.normalize();
        Self {
            document,
            selection,
            inverse: Box::new(RestoreSnapshot::capture(before, before_selection)),
        }
    }
}

/// Trait for all editing commands
///
/// Commands never mutate their input; each application is one undoable unit.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply this command to a document
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;

    /// Clone this command into a box
    fn clone_box(&self) -> Box<dyn Command>;
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Helper functions shared by the command modules
// ============================================================================

/// Validate a selection against a document, reporting stale paths as
/// rejected input
pub(crate) fn check_selection(document: &Document, selection: &Selection) -> Result<()> {
    document
        .validate_selection(selection)
        .map_err(|e| EditError::InvalidSelection(e.to_string()))
}

/// Index of a text block in document order
pub(crate) fn block_ordinal(document: &Document, path: &[usize]) -> Result<usize> {
    document
        .text_blocks()
        .iter()
        .position(|p| p.as_slice() == path)
        .ok_or_else(|| EditError::InvalidSelection(format!("{:?} is not a text block", path)))
}

/// Carry a selection across an edit that restructured blocks without
/// adding, removing, or reordering text blocks.
pub(crate) fn remap_selection(before: &Document, after: &Document, selection: &Selection) -> Result<Selection> {
    let blocks = after.text_blocks();
    let remap = |position: &Position| -> Result<Position> {
        let ordinal = block_ordinal(before, &position.path)?;
        let path = blocks.get(ordinal).cloned().ok_or_else(|| {
            EditError::ExecutionFailed("text block count changed during restructuring".to_string())
        })?;
        Ok(Position::new(path, position.offset))
    };
    Ok(Selection::new(remap(&selection.anchor)?, remap(&selection.focus)?))
}

/// Remove a single-block expanded selection, returning the caret position.
/// Multi-block replacement is rejected.
fn delete_selected(document: &mut Document, selection: &Selection) -> Result<Position> {
    let start = selection.start().clone();
    if selection.is_collapsed() {
        return Ok(start);
    }
    if start.path != selection.end().path {
        return Err(EditError::InvalidCommand(
            "Replacing a selection that spans blocks is not supported".to_string(),
        ));
    }
    let end_offset = selection.end().offset;
    document.text_block_mut(&start.path)?.remove_range(start.offset, end_offset);
    Ok(start)
}

// ============================================================================
// Snapshot restore (the inverse of every command)
// ============================================================================

/// Replace the whole document and selection with a stored snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreSnapshot {
    pub document: Document,
    pub selection: Selection,
}

impl RestoreSnapshot {
    pub fn capture(document: &Document, selection: &Selection) -> Self {
        Self {
            document: document.clone(),
            selection: selection.clone(),
        }
    }
}

impl Command for RestoreSnapshot {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        Ok(CommandResult {
            document: self.document.clone(),
            selection: self.selection.clone(),
            inverse: Box::new(RestoreSnapshot::capture(document, selection)),
        })
    }

    fn display_name(&self) -> &str {
        "Restore"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Typing
// ============================================================================

/// Insert text at the caret, replacing a single-block selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertText {
    pub text: String,
    /// Marks for the new text; `None` inherits from the caret
    pub marks: Option<Marks>,
}

impl InsertText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: None,
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks: Some(marks),
        }
    }
}

impl Command for InsertText {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;
        if self.text.is_empty() {
            return Err(EditError::InvalidCommand("Nothing to insert".to_string()));
        }

        let mut new_doc = document.clone();
        let caret = delete_selected(&mut new_doc, selection)?;
        new_doc
            .text_block_mut(&caret.path)?
            .insert_text(caret.offset, &self.text, self.marks);

        let new_selection = Selection::collapsed(Position::new(
            caret.path.clone(),
            caret.offset + grapheme_len(&self.text),
        ));
        Ok(CommandResult::edited(document, selection, new_doc, new_selection))
    }

    fn display_name(&self) -> &str {
        "Insert Text"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Split the text block at the caret (Enter key)
///
/// The new block keeps the kind of the old one, except that headings
/// continue as paragraphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertBreak;

impl InsertBreak {
    pub fn new() -> Self {
        Self
    }
}

impl Command for InsertBreak {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;

        let mut new_doc = document.clone();
        let caret = delete_selected(&mut new_doc, selection)?;
        let (parent, index) = match caret.path.split_last() {
            Some((index, parent)) => (parent.to_vec(), *index),
            None => return Err(EditError::InvalidSelection("Empty path".to_string())),
        };

        let block = new_doc.text_block_mut(&caret.path)?;
        let tail = block.split_children_off(caret.offset);
        let kind = match &block.kind {
            ElementKind::HeadingOne | ElementKind::HeadingTwo => ElementKind::Paragraph,
            other => other.clone(),
        };
        let new_block = Element {
            kind,
            align: block.align,
            children: tail,
        };

        let siblings = new_doc
            .children_mut(&parent)
            .ok_or_else(|| EditError::ExecutionFailed("Parent of text block vanished".to_string()))?;
        siblings.insert(index + 1, new_block.into());

        let mut new_path: Path = parent;
        new_path.push(index + 1);
        let new_selection = Selection::collapsed(Position::start_of(new_path));
        Ok(CommandResult::edited(document, selection, new_doc, new_selection))
    }

    fn display_name(&self) -> &str {
        "Insert Break"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Mark, Node, Text};

    fn doc(children: Vec<Node>) -> Document {
        Document::new(children)
    }

    #[test]
    fn test_insert_text_at_caret() {
        let document = doc(vec![Element::paragraph(vec![Node::text("helo")]).into()]);
        let selection = Selection::collapsed(Position::new(vec![0], 3));
        let result = InsertText::new("l").apply(&document, &selection).unwrap();
        assert_eq!(result.document.plain_text(), "hello");
        assert_eq!(result.selection, Selection::collapsed(Position::new(vec![0], 4)));
    }

    #[test]
    fn test_insert_text_replaces_selection() {
        let document = doc(vec![Element::paragraph(vec![Node::text("hello world")]).into()]);
        let selection = Selection::within(vec![0], 6, 11);
        let result = InsertText::new("there").apply(&document, &selection).unwrap();
        assert_eq!(result.document.plain_text(), "hello there");
    }

    #[test]
    fn test_insert_text_with_marks_creates_leaf() {
        let document = doc(vec![Element::paragraph(vec![Node::text("ab")]).into()]);
        let selection = Selection::collapsed(Position::new(vec![0], 2));
        let result = InsertText::with_marks("c", Marks::only(Mark::Bold))
            .apply(&document, &selection)
            .unwrap();
        let para = result.document.element(&[0]).unwrap();
        assert_eq!(para.children, vec![Node::text("ab"), Text::new("c").mark(Mark::Bold).into()]);
    }

    #[test]
    fn test_insert_text_rejects_cross_block_selection() {
        let document = doc(vec![
            Element::paragraph(vec![Node::text("a")]).into(),
            Element::paragraph(vec![Node::text("b")]).into(),
        ]);
        let selection = Selection::new(Position::new(vec![0], 0), Position::new(vec![1], 1));
        let err = InsertText::new("x").apply(&document, &selection).unwrap_err();
        assert!(err.is_rejection());
    }

    #[test]
    fn test_insert_break_in_list_item() {
        let document = doc(vec![Element::new(
            ElementKind::BulletedList,
            vec![Element::new(ElementKind::ListItem, vec![Node::text("onetwo")]).into()],
        )
        .into()]);
        let selection = Selection::collapsed(Position::new(vec![0, 0], 3));
        let result = InsertBreak::new().apply(&document, &selection).unwrap();

        let list = result.document.element(&[0]).unwrap();
        assert_eq!(list.children.len(), 2);
        assert_eq!(result.document.element(&[0, 1]).unwrap().kind, ElementKind::ListItem);
        assert_eq!(result.document.plain_text(), "one\ntwo");
        assert_eq!(result.selection, Selection::collapsed(Position::new(vec![0, 1], 0)));
    }

    #[test]
    fn test_insert_break_after_heading_starts_paragraph() {
        let document = doc(vec![Element::new(ElementKind::HeadingOne, vec![Node::text("Title")]).into()]);
        let selection = Selection::collapsed(Position::new(vec![0], 5));
        let result = InsertBreak::new().apply(&document, &selection).unwrap();
        let second = result.document.element(&[1]).unwrap();
        assert_eq!(second.kind, ElementKind::Paragraph);
        assert_eq!(second.children, vec![Node::text("")]);
    }

    #[test]
    fn test_restore_snapshot_inverts() {
        let document = doc(vec![Element::paragraph(vec![Node::text("abc")]).into()]);
        let selection = Selection::collapsed(Position::new(vec![0], 3));
        let result = InsertText::new("d").apply(&document, &selection).unwrap();
        let undone = result.inverse.apply(&result.document, &result.selection).unwrap();
        assert_eq!(undone.document, document);
        assert_eq!(undone.selection, selection);
    }
}
