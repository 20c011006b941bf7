//! Bounded undo/redo history

use crate::{Command, EditError, Result};
use std::collections::VecDeque;

/// Default number of undo entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// An entry in either stack
struct UndoEntry {
    /// The original command (kept for its display name)
    command: Box<dyn Command>,
    /// The command that reverts the step this entry records
    inverse: Box<dyn Command>,
}

/// Manages undo and redo stacks
///
/// Every executed command is one entry. The oldest entries are dropped
/// once `max_entries` is exceeded.
pub struct UndoManager {
    /// Commands that can be undone, oldest first
    undo_stack: VecDeque<UndoEntry>,
    /// Commands that can be redone
    redo_stack: Vec<UndoEntry>,
    /// Maximum number of undo entries
    max_entries: usize,
}

impl UndoManager {
    /// Create a new undo manager
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create with a custom limit (at least one entry is kept)
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a newly executed command, discarding the redo history
    pub fn push(&mut self, command: Box<dyn Command>, inverse: Box<dyn Command>) {
        self.redo_stack.clear();
        self.push_undo(command, inverse);
    }

    /// Record a redone command without touching the redo history
    pub fn push_undo(&mut self, command: Box<dyn Command>, inverse: Box<dyn Command>) {
        self.undo_stack.push_back(UndoEntry { command, inverse });
        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.pop_front();
        }
    }

    /// Pop the last command for undo, returning it with its inverse
    pub fn pop_undo(&mut self) -> Result<(Box<dyn Command>, Box<dyn Command>)> {
        let entry = self.undo_stack.pop_back().ok_or(EditError::UndoStackEmpty)?;
        Ok((entry.command, entry.inverse))
    }

    /// Record an undone command together with the command that reapplies it
    pub fn push_redo(&mut self, command: Box<dyn Command>, redo: Box<dyn Command>) {
        self.redo_stack.push(UndoEntry { command, inverse: redo });
    }

    /// Pop a command for redo, returning it with the command that reapplies it
    pub fn pop_redo(&mut self) -> Result<(Box<dyn Command>, Box<dyn Command>)> {
        let entry = self.redo_stack.pop().ok_or(EditError::RedoStackEmpty)?;
        Ok((entry.command, entry.inverse))
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the command that would be undone
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|entry| entry.command.display_name())
    }

    /// Name of the command that would be redone
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|entry| entry.command.display_name())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}
