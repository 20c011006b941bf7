//! Error types for the editor component

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Edit error: {0}")]
    Edit(#[from] edit_engine::EditError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// A panic caught at the component boundary
    #[error("Panicked during {context}: {message}")]
    Panicked { context: String, message: String },
}

impl EditorError {
    /// Build from a payload returned by `catch_unwind`
    pub fn from_panic(context: impl Into<String>, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        EditorError::Panicked {
            context: context.into(),
            message,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
