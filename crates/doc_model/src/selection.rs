//! Selection model - caret position and text selection

use serde::{Deserialize, Serialize};

/// Child-index path from the document root to a node
pub type Path = Vec<usize>;

/// A position in the document
///
/// `path` addresses a text block; `offset` counts grapheme clusters into
/// the block's concatenated text. Positions order by path, then offset,
/// which matches document order because text blocks never nest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub path: Path,
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }

    /// Create a position at the start of a text block
    pub fn start_of(path: impl Into<Path>) -> Self {
        Self::new(path, 0)
    }
}

/// A selection in the document
///
/// A selection has an anchor (where the selection started) and a focus
/// (where the caret is). When anchor == focus, the selection is collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// Create a collapsed selection (caret only)
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    /// Select `[from, to)` inside a single text block
    pub fn within(path: impl Into<Path>, from: usize, to: usize) -> Self {
        let path = path.into();
        Self::new(Position::new(path.clone(), from), Position::new(path, to))
    }

    /// Check if this selection is collapsed (just a caret)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Check if the selection goes forward (anchor before focus)
    pub fn is_forward(&self) -> bool {
        self.anchor <= self.focus
    }

    /// The earlier of anchor and focus
    pub fn start(&self) -> &Position {
        if self.is_forward() {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// The later of anchor and focus
    pub fn end(&self) -> &Position {
        if self.is_forward() {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// Collapse the selection to its end
    pub fn collapse_to_end(&self) -> Self {
        Self::collapsed(self.end().clone())
    }
}

/// Parent path, or `None` for the root
pub fn parent_path(path: &[usize]) -> Option<&[usize]> {
    path.split_last().map(|(_, parent)| parent)
}

/// Longest shared prefix of two paths
pub fn common_prefix(a: &[usize], b: &[usize]) -> Path {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| *x)
        .collect()
}
