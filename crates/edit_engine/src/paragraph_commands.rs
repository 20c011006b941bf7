//! Block formatting commands: block type and alignment

use crate::command::{block_ordinal, check_selection, remap_selection};
use crate::list_commands::{unwrap_lists, wrap_in_list};
use crate::{is_align_active, is_block_active, Command, CommandResult, EditError, Result};
use doc_model::{Alignment, Document, ElementKind, Path, Selection};
use serde::{Deserialize, Serialize};

// =============================================================================
// Block Formats
// =============================================================================

/// Block types reachable from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockFormat {
    #[serde(rename = "heading-1")]
    HeadingOne,
    #[serde(rename = "heading-2")]
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
}

impl BlockFormat {
    pub const ALL: [BlockFormat; 5] = [
        BlockFormat::HeadingOne,
        BlockFormat::HeadingTwo,
        BlockFormat::BlockQuote,
        BlockFormat::BulletedList,
        BlockFormat::NumberedList,
    ];

    /// Element kind this format produces (the container kind for lists)
    pub fn kind(&self) -> ElementKind {
        match self {
            BlockFormat::HeadingOne => ElementKind::HeadingOne,
            BlockFormat::HeadingTwo => ElementKind::HeadingTwo,
            BlockFormat::BlockQuote => ElementKind::BlockQuote,
            BlockFormat::BulletedList => ElementKind::BulletedList,
            BlockFormat::NumberedList => ElementKind::NumberedList,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockFormat::BulletedList | BlockFormat::NumberedList)
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Paths of the selected text blocks with their ordinal range
fn selected_blocks(document: &Document, selection: &Selection) -> Result<(Vec<Path>, usize, usize)> {
    let start = block_ordinal(document, &selection.start().path)?;
    let end = block_ordinal(document, &selection.end().path)?;
    let blocks = document.text_blocks()[start..=end].to_vec();
    Ok((blocks, start, end))
}

// =============================================================================
// Toggle Block Command
// =============================================================================

/// Toggle the selected blocks to or from a block format
///
/// Selected blocks are always lifted out of every list enclosing them
/// first, so lists never nest through this command. Toggling off reverts blocks to
/// paragraphs; toggling a list on retypes blocks to list items and wraps
/// them in a single new list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleBlock {
    pub format: BlockFormat,
}

impl ToggleBlock {
    pub fn new(format: BlockFormat) -> Self {
        Self { format }
    }
}

impl Command for ToggleBlock {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;
        let active = is_block_active(document, selection, self.format);
        let (blocks, start, end) = selected_blocks(document, selection)?;

        let mut new_doc = document.clone();
        unwrap_lists(&mut new_doc, &blocks)?;

        let target = if active {
            ElementKind::Paragraph
        } else if self.format.is_list() {
            ElementKind::ListItem
        } else {
            self.format.kind()
        };
        let lifted = new_doc.text_blocks();
        let range = lifted.get(start..=end).ok_or_else(|| {
            EditError::ExecutionFailed("text block count changed while unwrapping lists".to_string())
        })?;
        for path in range {
            new_doc.text_block_mut(path)?.kind = target.clone();
        }

        if !active && self.format.is_list() {
            wrap_in_list(&mut new_doc, range, self.format.kind())?;
        }

        new_doc.normalize();
        let new_selection = remap_selection(document, &new_doc, selection)?;
        Ok(CommandResult::edited(document, selection, new_doc, new_selection))
    }

    fn display_name(&self) -> &str {
        match self.format {
            BlockFormat::HeadingOne => "Heading 1",
            BlockFormat::HeadingTwo => "Heading 2",
            BlockFormat::BlockQuote => "Block Quote",
            BlockFormat::BulletedList => "Bulleted List",
            BlockFormat::NumberedList => "Numbered List",
        }
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Toggle Alignment Command
// =============================================================================

/// Set the alignment of the selected blocks, or clear it when the nearest
/// block already has it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAlign {
    pub alignment: Alignment,
}

impl ToggleAlign {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn left() -> Self {
        Self::new(Alignment::Left)
    }

    pub fn center() -> Self {
        Self::new(Alignment::Center)
    }

    pub fn right() -> Self {
        Self::new(Alignment::Right)
    }
}

impl Command for ToggleAlign {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        check_selection(document, selection)?;
        let value = if is_align_active(document, selection, self.alignment) {
            None
        } else {
            Some(self.alignment)
        };

        let (blocks, _, _) = selected_blocks(document, selection)?;
        let mut new_doc = document.clone();
        for path in &blocks {
            new_doc.text_block_mut(path)?.align = value;
        }

        Ok(CommandResult::edited(document, selection, new_doc, selection.clone()))
    }

    fn display_name(&self) -> &str {
        match self.alignment {
            Alignment::Left => "Align Left",
            Alignment::Center => "Align Center",
            Alignment::Right => "Align Right",
        }
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
