//! Command execution engine

use crate::command::check_selection;
use crate::{
    is_align_active, is_block_active, is_link_active, is_mark_active, marks_at, BlockFormat, Command,
    InsertText, Result, ToggleMark, UndoManager,
};
use doc_model::{Alignment, Document, Mark, Marks, Selection};

/// The main editing engine that manages document state and command execution
pub struct EditingEngine {
    /// Current document
    document: Document,
    /// Current selection
    selection: Selection,
    /// Undo manager
    undo_manager: UndoManager,
    /// Marks toggled at a collapsed caret, applied to the next typed text
    pending_marks: Option<Marks>,
}

impl EditingEngine {
    /// Create a new editing engine with the canonical empty document
    pub fn new() -> Self {
        Self::with_document(Document::empty())
    }

    /// Create an editing engine with a specific document; the caret starts
    /// at the beginning
    pub fn with_document(document: Document) -> Self {
        let selection = Selection::collapsed(document.start());
        Self {
            document,
            selection,
            undo_manager: UndoManager::new(),
            pending_marks: None,
        }
    }

    /// Replace the history with one of the given size
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.undo_manager = UndoManager::with_limit(limit);
        self
    }

    /// Get the current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo_manager
    }

    /// Set the selection; pending caret marks are discarded
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        check_selection(&self.document, &selection)?;
        self.selection = selection;
        self.pending_marks = None;
        Ok(())
    }

    /// Replace the document without recording history; the caret moves
    /// to the start and the history is cleared
    pub fn reset(&mut self, document: Document) {
        self.selection = Selection::collapsed(document.start());
        self.document = document;
        self.undo_manager.clear();
        self.pending_marks = None;
    }

    /// Execute a command as one undoable step
    pub fn execute(&mut self, command: Box<dyn Command>) -> Result<()> {
        let result = command.apply(&self.document, &self.selection)?;
        tracing::debug!(command = command.display_name(), "executed command");

        self.undo_manager.push(command, result.inverse);
        self.document = result.document;
        self.selection = result.selection;
        self.pending_marks = None;

        Ok(())
    }

    /// Undo the last command
    pub fn undo(&mut self) -> Result<()> {
        let (command, inverse) = self.undo_manager.pop_undo()?;
        let result = inverse.apply(&self.document, &self.selection)?;
        tracing::debug!(command = command.display_name(), "undo");

        self.undo_manager.push_redo(command, result.inverse);
        self.document = result.document;
        self.selection = result.selection;
        self.pending_marks = None;

        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self) -> Result<()> {
        let (command, redo) = self.undo_manager.pop_redo()?;
        let result = redo.apply(&self.document, &self.selection)?;
        tracing::debug!(command = command.display_name(), "redo");

        self.undo_manager.push_undo(command, result.inverse);
        self.document = result.document;
        self.selection = result.selection;
        self.pending_marks = None;

        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_manager.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.undo_manager.can_redo()
    }

    /// Toggle a mark. At a caret this only flips the pending marks for the
    /// next typed text and records no history.
    pub fn toggle_mark(&mut self, mark: Mark) -> Result<()> {
        if self.selection.is_collapsed() {
            let current = self.active_marks();
            self.pending_marks = Some(current.with(mark, !current.has(mark)));
            return Ok(());
        }
        self.execute(Box::new(ToggleMark::new(mark)))
    }

    /// Insert typed text, applying pending caret marks
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        let command = match self.pending_marks {
            Some(marks) => InsertText::with_marks(text, marks),
            None => InsertText::new(text),
        };
        self.execute(Box::new(command))
    }

    /// Marks that typed text would receive
    pub fn active_marks(&self) -> Marks {
        self.pending_marks
            .unwrap_or_else(|| marks_at(&self.document, &self.selection.focus))
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        if self.selection.is_collapsed() {
            return self.active_marks().has(mark);
        }
        is_mark_active(&self.document, &self.selection, mark)
    }

    pub fn is_block_active(&self, format: BlockFormat) -> bool {
        is_block_active(&self.document, &self.selection, format)
    }

    pub fn is_align_active(&self, alignment: Alignment) -> bool {
        is_align_active(&self.document, &self.selection, alignment)
    }

    pub fn is_link_active(&self) -> bool {
        is_link_active(&self.document, &self.selection)
    }
}

impl Default for EditingEngine {
    fn default() -> Self {
        Self::new()
    }
}
