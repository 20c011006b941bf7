//! Editor failure modes
//!
//! Transitions only move forward: Normal -> Fallback -> Fatal. A host
//! leaves Fatal by reloading the page.

use serde::{Deserialize, Serialize};

/// Current rendering mode of the editor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EditorMode {
    /// Full rich-text editing
    #[default]
    Normal,
    /// Plain text area over the raw HTML
    Fallback { reason: String },
    /// Crash banner only
    Fatal { reason: String },
}

impl EditorMode {
    /// Get display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorMode::Normal => "Normal",
            EditorMode::Fallback { .. } => "Fallback",
            EditorMode::Fatal { .. } => "Fatal",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, EditorMode::Normal)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, EditorMode::Fallback { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, EditorMode::Fatal { .. })
    }

    /// Why the editor left normal mode
    pub fn reason(&self) -> Option<&str> {
        match self {
            EditorMode::Normal => None,
            EditorMode::Fallback { reason } | EditorMode::Fatal { reason } => Some(reason),
        }
    }

    /// Normal degrades to Fallback; later modes are unchanged.
    /// Returns true if the mode changed.
    pub fn degrade(&mut self, reason: impl Into<String>) -> bool {
        if self.is_normal() {
            *self = EditorMode::Fallback { reason: reason.into() };
            true
        } else {
            false
        }
    }

    /// Any mode except Fatal moves to Fatal. Returns true if the mode changed.
    pub fn crash(&mut self, reason: impl Into<String>) -> bool {
        if self.is_fatal() {
            false
        } else {
            *self = EditorMode::Fatal { reason: reason.into() };
            true
        }
    }
}
