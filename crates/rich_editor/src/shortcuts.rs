//! Keyboard shortcuts
//!
//! `mod` is Ctrl on Windows/Linux and Cmd on macOS; either modifier
//! triggers a shortcut.

use crate::ToolbarAction;
use doc_model::Mark;
use serde::{Deserialize, Serialize};

/// A key press with its modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyChord {
    /// Key value, compared case-insensitively
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Parse a binding such as `"mod+shift+z"` or `"Ctrl+B"`; `mod` maps to Ctrl
    pub fn parse(binding: &str) -> Option<Self> {
        let mut chord = Self::default();
        let mut key = None;
        for part in binding.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "mod" | "ctrl" | "control" => chord.ctrl = true,
                "cmd" | "meta" => chord.meta = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                "" => return None,
                _ => key = Some(part.to_string()),
            }
        }
        chord.key = key?;
        Some(chord)
    }

    pub fn has_mod(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Map a key press to its toolbar action
pub fn shortcut_action(chord: &KeyChord) -> Option<ToolbarAction> {
    if !chord.has_mod() || chord.alt {
        return None;
    }
    let action = match (chord.key.to_ascii_lowercase().as_str(), chord.shift) {
        ("b", false) => ToolbarAction::Mark(Mark::Bold),
        ("i", false) => ToolbarAction::Mark(Mark::Italic),
        ("u", false) => ToolbarAction::Mark(Mark::Underline),
        ("`", false) => ToolbarAction::Mark(Mark::Code),
        ("z", false) => ToolbarAction::Undo,
        ("z", true) | ("y", false) => ToolbarAction::Redo,
        _ => return None,
    };
    Some(action)
}
