//! Toolbar actions and their reflected state
//!
//! Button state is recomputed from the engine on every render; nothing is
//! cached between renders.

use doc_model::{Alignment, Mark};
use edit_engine::{BlockFormat, EditingEngine};
use serde::{Deserialize, Serialize};

/// An action triggered from the toolbar or a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum ToolbarAction {
    Mark(Mark),
    Block(BlockFormat),
    Align(Alignment),
    Link,
    Undo,
    Redo,
}

impl ToolbarAction {
    /// Every toolbar control in display order
    pub const ALL: [ToolbarAction; 15] = [
        ToolbarAction::Mark(Mark::Bold),
        ToolbarAction::Mark(Mark::Italic),
        ToolbarAction::Mark(Mark::Underline),
        ToolbarAction::Mark(Mark::Code),
        ToolbarAction::Block(BlockFormat::HeadingOne),
        ToolbarAction::Block(BlockFormat::HeadingTwo),
        ToolbarAction::Block(BlockFormat::BlockQuote),
        ToolbarAction::Block(BlockFormat::NumberedList),
        ToolbarAction::Block(BlockFormat::BulletedList),
        ToolbarAction::Align(Alignment::Left),
        ToolbarAction::Align(Alignment::Center),
        ToolbarAction::Align(Alignment::Right),
        ToolbarAction::Link,
        ToolbarAction::Undo,
        ToolbarAction::Redo,
    ];

    /// Tooltip label
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarAction::Mark(Mark::Bold) => "Bold",
            ToolbarAction::Mark(Mark::Italic) => "Italic",
            ToolbarAction::Mark(Mark::Underline) => "Underline",
            ToolbarAction::Mark(Mark::Code) => "Code",
            ToolbarAction::Block(BlockFormat::HeadingOne) => "Heading 1",
            ToolbarAction::Block(BlockFormat::HeadingTwo) => "Heading 2",
            ToolbarAction::Block(BlockFormat::BlockQuote) => "Quote",
            ToolbarAction::Block(BlockFormat::NumberedList) => "Numbered list",
            ToolbarAction::Block(BlockFormat::BulletedList) => "Bulleted list",
            ToolbarAction::Align(Alignment::Left) => "Align left",
            ToolbarAction::Align(Alignment::Center) => "Align center",
            ToolbarAction::Align(Alignment::Right) => "Align right",
            ToolbarAction::Link => "Link",
            ToolbarAction::Undo => "Undo",
            ToolbarAction::Redo => "Redo",
        }
    }
}

/// State of one toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub action: ToolbarAction,
    /// Formatting is present at the selection
    pub active: bool,
    /// The button can be pressed
    pub enabled: bool,
}

/// Snapshot of every toolbar button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarState {
    pub buttons: Vec<ButtonState>,
}

impl ToolbarState {
    /// Query every control against the engine's document and selection
    pub fn compute(engine: &EditingEngine) -> Self {
        let buttons = ToolbarAction::ALL
            .iter()
            .map(|&action| {
                let (active, enabled) = match action {
                    ToolbarAction::Mark(mark) => (engine.is_mark_active(mark), true),
                    ToolbarAction::Block(format) => (engine.is_block_active(format), true),
                    ToolbarAction::Align(alignment) => (engine.is_align_active(alignment), true),
                    ToolbarAction::Link => (engine.is_link_active(), true),
                    ToolbarAction::Undo => (false, engine.can_undo()),
                    ToolbarAction::Redo => (false, engine.can_redo()),
                };
                ButtonState {
                    action,
                    active,
                    enabled,
                }
            })
            .collect();
        Self { buttons }
    }

    pub fn button(&self, action: ToolbarAction) -> Option<&ButtonState> {
        self.buttons.iter().find(|button| button.action == action)
    }

    pub fn is_active(&self, action: ToolbarAction) -> bool {
        self.button(action).is_some_and(|button| button.active)
    }

    pub fn is_enabled(&self, action: ToolbarAction) -> bool {
        self.button(action).is_some_and(|button| button.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Document, Element, ElementKind, Node, Position, Selection, Text};

    fn engine() -> EditingEngine {
        EditingEngine::with_document(Document::new(vec![
            Element::new(ElementKind::HeadingOne, vec![Text::new("Title").mark(Mark::Bold).into()])
                .with_align(Alignment::Center)
                .into(),
            Element::paragraph(vec![Node::text("body")]).into(),
        ]))
    }

    #[test]
    fn test_reflects_caret_context() {
        let mut engine = engine();
        engine.set_selection(Selection::collapsed(Position::new(vec![0], 2))).unwrap();
        let state = ToolbarState::compute(&engine);

        assert_eq!(state.buttons.len(), ToolbarAction::ALL.len());
        assert!(state.is_active(ToolbarAction::Mark(Mark::Bold)));
        assert!(state.is_active(ToolbarAction::Block(BlockFormat::HeadingOne)));
        assert!(state.is_active(ToolbarAction::Align(Alignment::Center)));
        assert!(!state.is_active(ToolbarAction::Link));
        assert!(!state.is_enabled(ToolbarAction::Undo));
        assert!(!state.is_enabled(ToolbarAction::Redo));
    }

    #[test]
    fn test_is_pure_function_of_state() {
        let mut engine = engine();
        engine.set_selection(Selection::collapsed(Position::new(vec![1], 1))).unwrap();
        let first = ToolbarState::compute(&engine);
        let second = ToolbarState::compute(&engine);
        assert_eq!(first, second);
        assert!(!first.is_active(ToolbarAction::Mark(Mark::Bold)));
    }

    #[test]
    fn test_undo_enabled_after_edit() {
        let mut engine = engine();
        engine.set_selection(Selection::within(vec![1], 0, 4)).unwrap();
        engine.toggle_mark(Mark::Italic).unwrap();
        let state = ToolbarState::compute(&engine);
        assert!(state.is_enabled(ToolbarAction::Undo));
        assert!(state.is_active(ToolbarAction::Mark(Mark::Italic)));
    }
}
