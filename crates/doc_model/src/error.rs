//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Node not found at path {0:?}")]
    NodeNotFound(Vec<usize>),

    #[error("Node at path {0:?} is not a text block")]
    NotATextBlock(Vec<usize>),

    #[error("Invalid position: path {path:?}, offset {offset}")]
    InvalidPosition { path: Vec<usize>, offset: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
