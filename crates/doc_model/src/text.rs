//! Text leaf - a contiguous span of text with consistent inline marks

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// An inline formatting mark carried on text leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Code];

    pub fn name(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The set of marks applied to a text leaf
///
/// Flags are independent; any combination is legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl Marks {
    /// Marks with a single flag set
    pub fn only(mark: Mark) -> Self {
        let mut marks = Self::default();
        marks.set(mark, true);
        marks
    }

    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    pub fn set(&mut self, mark: Mark, value: bool) {
        match mark {
            Mark::Bold => self.bold = value,
            Mark::Italic => self.italic = value,
            Mark::Underline => self.underline = value,
            Mark::Code => self.code = value,
        }
    }

    /// Return a copy with `mark` set to `value`
    pub fn with(mut self, mark: Mark, value: bool) -> Self {
        self.set(mark, value);
        self
    }

    /// Check if no mark is set
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A text leaf node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// The text content of this leaf
    pub text: String,
    /// Inline formatting
    #[serde(flatten)]
    pub marks: Marks,
}

impl Text {
    /// Create a plain text leaf
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    /// Create a text leaf with marks
    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Builder-style mark setter, mostly useful when constructing fixtures
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.set(mark, true);
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.has(mark)
    }

    /// Length in grapheme clusters
    pub fn len(&self) -> usize {
        grapheme_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split this leaf at a grapheme offset, returning the tail with the same marks
    pub fn split_off(&mut self, at: usize) -> Text {
        let byte = grapheme_byte_offset(&self.text, at);
        let tail = self.text.split_off(byte);
        Text::with_marks(tail, self.marks)
    }

    /// Insert a string at a grapheme offset
    pub fn insert_str(&mut self, at: usize, text: &str) {
        let byte = grapheme_byte_offset(&self.text, at);
        self.text.insert_str(byte, text);
    }
}

/// Number of grapheme clusters in a string
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte index of a grapheme offset, clamped to the end of the string
pub fn grapheme_byte_offset(text: &str, offset: usize) -> usize {
    text.grapheme_indices(true)
        .nth(offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
