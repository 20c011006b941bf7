//! Editor presentation settings
//!
//! Hosts pass these as JSON props, so field names are camelCase and every
//! field is optional.

use crate::Result;
use edit_engine::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Fixed height of the toolbar in pixels
pub const TOOLBAR_HEIGHT: u32 = 40;

/// Editor component settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Text shown while the document is empty
    pub placeholder: String,
    /// Total height in pixels, toolbar included
    pub height: u32,
    /// Hide the toolbar and make the content read-only
    pub disabled: bool,
    /// Extra CSS class for the outer container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Maximum number of undo steps
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: "Start typing…".to_string(),
            height: 400,
            disabled: false,
            class_name: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse editor settings, using defaults");
                Self::default()
            }
        }
    }

    /// Height of the scrollable content area
    pub fn content_height(&self) -> u32 {
        if self.disabled {
            self.height
        } else {
            self.height.saturating_sub(TOOLBAR_HEIGHT)
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.placeholder, "Start typing…");
        assert_eq!(config.height, 400);
        assert!(!config.disabled);
        assert_eq!(config.content_height(), 360);
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"height": 250, "className": "notes"}"#).unwrap();
        assert_eq!(config.height, 250);
        assert_eq!(config.class_name.as_deref(), Some("notes"));
        assert_eq!(config.placeholder, "Start typing…");
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_load_or_default_recovers() {
        assert_eq!(EditorConfig::load_or_default("{not json"), EditorConfig::default());
        assert_eq!(EditorConfig::load_or_default(r#"{"height": "tall"}"#), EditorConfig::default());
    }

    #[test]
    fn test_disabled_keeps_full_height() {
        let config = EditorConfig::default().with_height(30).disabled();
        assert_eq!(config.content_height(), 30);
        assert_eq!(EditorConfig::default().with_height(30).content_height(), 0);
    }
}
