//! Render output
//!
//! The editor never draws anything itself; it produces a view model that a
//! host paints. Each mode has its own view.

use crate::ToolbarState;
use doc_model::{Document, Selection};
use serde::{Deserialize, Serialize};

/// Notice shown above the plain-text fallback
pub const FALLBACK_NOTICE: &str =
    "The rich text editor could not be loaded. You can still edit the raw HTML below.";

/// Banner shown once the fallback has failed too
pub const CRASH_MESSAGE: &str = "The editor crashed. Please reload the page.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    Editor(EditorView),
    Fallback(FallbackView),
    Crashed(CrashView),
}

impl View {
    pub fn as_editor(&self) -> Option<&EditorView> {
        match self {
            View::Editor(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_fallback(&self) -> Option<&FallbackView> {
        match self {
            View::Fallback(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_crashed(&self) -> bool {
        matches!(self, View::Crashed(_))
    }
}

/// Rich-text editing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    /// `None` when the editor is disabled
    pub toolbar: Option<ToolbarState>,
    pub document: Document,
    pub selection: Selection,
    /// Shown only while the document is empty
    pub placeholder: Option<String>,
    pub read_only: bool,
    pub class_name: Option<String>,
    /// Height of the scrollable content area in pixels
    pub content_height: u32,
}

/// Plain multi-line text area bound to the raw HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackView {
    pub value: String,
    pub notice: String,
    pub read_only: bool,
    pub class_name: Option<String>,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashView {
    pub message: String,
}

impl Default for CrashView {
    fn default() -> Self {
        Self {
            message: CRASH_MESSAGE.to_string(),
        }
    }
}
