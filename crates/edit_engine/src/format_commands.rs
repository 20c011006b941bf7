//! Character formatting commands

use crate::command::check_selection;
use crate::{is_mark_active, Command, CommandResult, EditError, Result};
use doc_model::{Document, Mark, Selection};
use serde::{Deserialize, Serialize};

/// Toggle a mark over an expanded selection
///
/// When every selected leaf already carries the mark it is removed from
/// all of them, otherwise it is added to all of them. A collapsed selection
/// is rejected; the engine keeps caret marks as pending state instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleMark {
    pub mark: Mark,
}

impl ToggleMark {
    pub fn new(mark: Mark) -> Self {
        Self { mark }
    }

    pub fn bold() -> Self {
        Self::new(Mark::Bold)
    }

    pub fn italic() -> Self {
        Self::new(Mark::Italic)
    }

    pub fn underline() -> Self {
        Self::new(Mark::Underline)
    }

    pub fn code() -> Self {
        Self::new(Mark::Code)
    }
}

impl Command for ToggleMark {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;
        if selection.is_collapsed() {
            return Err(EditError::InvalidSelection(
                "Cannot toggle a mark on a collapsed selection".to_string(),
            ));
        }

        let ranges = document.blocks_in_selection(selection);
        if ranges.iter().all(|(_, from, to)| from == to) {
            return Err(EditError::InvalidSelection(
                "Selection covers no text to mark".to_string(),
            ));
        }

        let value = !is_mark_active(document, selection, self.mark);
        let mut new_doc = document.clone();
        for (path, from, to) in ranges {
            if from == to {
                continue;
            }
            let block = new_doc.text_block_mut(&path)?;
            block.split_leaf_at(from);
            block.split_leaf_at(to);
            block.for_each_leaf_mut(|start, leaf| {
                if start >= from && start + leaf.len() <= to && !leaf.is_empty() {
                    leaf.marks.set(self.mark, value);
                }
            });
        }

        Ok(CommandResult::edited(document, selection, new_doc, selection.clone()))
    }

    fn display_name(&self) -> &str {
        match self.mark {
            Mark::Bold => "Bold",
            Mark::Italic => "Italic",
            Mark::Underline => "Underline",
            Mark::Code => "Code",
        }
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
