//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Undo stack is empty")]
    UndoStackEmpty,

    #[error("Redo stack is empty")]
    RedoStackEmpty,
}

impl EditError {
    /// Rejected input (nothing to undo, missing link text, stale selection)
    /// as opposed to a failure inside the engine
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EditError::InvalidCommand(_)
                | EditError::InvalidSelection(_)
                | EditError::UndoStackEmpty
                | EditError::RedoStackEmpty
        )
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
