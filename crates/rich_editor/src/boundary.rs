//! Error boundary for the editor component
//!
//! Keeps the failures caught at the component edge, with the mode the
//! editor ended up in, for the host to inspect. Mode changes themselves
//! live in [`crate::EditorMode`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a failure was caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// Construction, rebuild, or a command
    Edit,
    Render,
    ChangeHandler,
}

/// One recorded failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryError {
    pub timestamp: DateTime<Utc>,
    pub kind: FailureKind,
    pub message: String,
    /// Display name of the mode after the failure was handled
    pub mode: String,
    /// True if this failure moved the editor to a later mode
    pub escalated: bool,
}

#[derive(Debug)]
pub struct ErrorBoundary {
    recent_errors: Vec<BoundaryError>,
    max_recent: usize,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self {
            recent_errors: Vec::new(),
            max_recent: 50,
        }
    }

    pub fn record_error(&mut self, kind: FailureKind, message: impl Into<String>, mode: &str, escalated: bool) {
        self.recent_errors.push(BoundaryError {
            timestamp: Utc::now(),
            kind,
            message: message.into(),
            mode: mode.to_string(),
            escalated,
        });
        if self.recent_errors.len() > self.max_recent {
            self.recent_errors.remove(0);
        }
    }

    pub fn recent_error_count(&self) -> usize {
        self.recent_errors.len()
    }

    pub fn last_error(&self) -> Option<&BoundaryError> {
        self.recent_errors.last()
    }

    /// Oldest first
    pub fn recent_errors(&self) -> &[BoundaryError] {
        &self.recent_errors
    }
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_caps() {
        let mut boundary = ErrorBoundary::new();
        for i in 0..60 {
            boundary.record_error(FailureKind::Edit, format!("failure {i}"), "Fallback", i == 0);
        }
        assert_eq!(boundary.recent_error_count(), 50);
        assert_eq!(boundary.recent_errors()[0].message, "failure 10");
        assert!(boundary.recent_errors().iter().all(|e| !e.escalated));
        let last = boundary.last_error().unwrap();
        assert_eq!(last.message, "failure 59");
        assert_eq!(last.kind, FailureKind::Edit);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&FailureKind::ChangeHandler).unwrap();
        assert_eq!(json, "\"change-handler\"");
    }
}
