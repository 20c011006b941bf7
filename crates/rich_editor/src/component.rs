//! The rich-text editor component
//!
//! `RichTextEditor` owns one [`EditingEngine`] built from the host's HTML
//! value. Every successful edit is serialized back to HTML and handed to the
//! host's change handler. Failures never reach the host: the editor moves
//! through [`EditorMode`] instead.

use crate::{
    shortcut_action, CrashView, EditorConfig, EditorError, EditorMode, EditorView, ErrorBoundary,
    FailureKind, FallbackView, KeyChord, NoPrompt, Prompt, ToolbarAction, ToolbarState, View,
    FALLBACK_NOTICE,
};
use doc_model::{Document, Selection};
use edit_engine::{
    Command, EditingEngine, InsertBreak, InsertLink, RemoveLink, ToggleAlign, ToggleBlock,
};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Host callback receiving the serialized HTML after each change
pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// Outcome of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The action ran
    Applied,
    /// Nothing happened: read-only, rejected input, cancelled prompt,
    /// or not in normal mode
    Ignored,
    /// The action failed and the editor switched to the fallback
    Degraded,
}

pub struct RichTextEditor {
    config: EditorConfig,
    engine: EditingEngine,
    mode: EditorMode,
    /// Last HTML received from or sent to the host
    value: String,
    on_change: Option<ChangeHandler>,
    boundary: ErrorBoundary,
}

impl std::fmt::Debug for RichTextEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("on_change", &self.on_change.as_ref().map(|_| "<callback>"))
            .field("boundary", &self.boundary)
            .finish()
    }
}

impl RichTextEditor {
    /// Build the editor from the host's HTML value
    pub fn new(value: Option<&str>, config: EditorConfig) -> Self {
        let history_limit = config.history_limit;
        let mut editor = Self {
            config,
            engine: EditingEngine::new().with_history_limit(history_limit),
            mode: EditorMode::Normal,
            value: value.unwrap_or_default().to_string(),
            on_change: None,
            boundary: ErrorBoundary::new(),
        };

        match catch_unwind(AssertUnwindSafe(|| store::deserialize(value))) {
            Ok(document) => {
                editor.engine =
                    EditingEngine::with_document(document).with_history_limit(history_limit)
            }
            Err(payload) => {
                editor.degrade(EditorError::from_panic("construction", payload), FailureKind::Edit)
            }
        }
        editor
    }

    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current HTML value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn document(&self) -> &Document {
        self.engine.document()
    }

    pub fn selection(&self) -> &Selection {
        self.engine.selection()
    }

    pub fn engine(&self) -> &EditingEngine {
        &self.engine
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// Toolbar state, or `None` while the toolbar is hidden
    pub fn toolbar_state(&self) -> Option<ToolbarState> {
        (self.mode.is_normal() && !self.config.disabled)
            .then(|| ToolbarState::compute(&self.engine))
    }

    /// Accept a new value from the host. The document is rebuilt from
    /// scratch, history included, when the value differs from the last
    /// known HTML. Returns true if the value was replaced.
    pub fn set_value(&mut self, html: &str) -> bool {
        if html == self.value {
            return false;
        }
        self.value = html.to_string();
        if self.mode.is_normal() {
            match catch_unwind(AssertUnwindSafe(|| store::deserialize(Some(html)))) {
                Ok(document) => self.engine.reset(document),
                Err(payload) => {
                    self.degrade(EditorError::from_panic("rebuild", payload), FailureKind::Edit)
                }
            }
        }
        true
    }

    /// Move the selection; allowed while disabled
    pub fn select(&mut self, selection: Selection) -> Dispatch {
        self.guarded("select", false, |engine| engine.set_selection(selection))
    }

    /// Run an arbitrary command as one undoable step
    pub fn execute(&mut self, command: Box<dyn Command>) -> Dispatch {
        self.guarded("execute", true, |engine| engine.execute(command))
    }

    pub fn dispatch(&mut self, action: ToolbarAction) -> Dispatch {
        self.dispatch_with_prompt(action, &mut NoPrompt)
    }

    /// Run a toolbar action; the link control reads its input from `prompt`
    pub fn dispatch_with_prompt(&mut self, action: ToolbarAction, prompt: &mut dyn Prompt) -> Dispatch {
        match action {
            ToolbarAction::Mark(mark) => {
                self.guarded("toggle mark", true, |engine| engine.toggle_mark(mark))
            }
            ToolbarAction::Block(format) => self.guarded("toggle block", true, |engine| {
                engine.execute(Box::new(ToggleBlock::new(format)))
            }),
            ToolbarAction::Align(alignment) => self.guarded("toggle align", true, |engine| {
                engine.execute(Box::new(ToggleAlign::new(alignment)))
            }),
            ToolbarAction::Link => self.dispatch_link(prompt),
            ToolbarAction::Undo => self.guarded("undo", true, |engine| engine.undo()),
            ToolbarAction::Redo => self.guarded("redo", true, |engine| engine.redo()),
        }
    }

    /// Handle a key press; unbound chords are ignored
    pub fn key_down(&mut self, chord: &KeyChord) -> Dispatch {
        match shortcut_action(chord) {
            Some(action) => self.dispatch(action),
            None => Dispatch::Ignored,
        }
    }

    pub fn insert_text(&mut self, text: &str) -> Dispatch {
        self.guarded("insert text", true, |engine| engine.insert_text(text))
    }

    pub fn insert_break(&mut self) -> Dispatch {
        self.guarded("insert break", true, |engine| {
            engine.execute(Box::new(InsertBreak::new()))
        })
    }

    /// Change handler of the plain-text fallback. A failing host handler
    /// leaves the value unchanged.
    pub fn fallback_input(&mut self, text: &str) -> Dispatch {
        if !self.mode.is_fallback() || self.config.disabled {
            return Dispatch::Ignored;
        }
        let outcome = match self.on_change.as_mut() {
            Some(handler) => catch_unwind(AssertUnwindSafe(|| handler(text))),
            None => Ok(()),
        };
        match outcome {
            Ok(()) => {
                self.value = text.to_string();
                Dispatch::Applied
            }
            Err(payload) => {
                let error = EditorError::from_panic("fallback change handler", payload);
                tracing::error!(error = %error, "fallback change handler failed, value unchanged");
                self.boundary.record_error(
                    FailureKind::ChangeHandler,
                    error.to_string(),
                    self.mode.display_name(),
                    false,
                );
                Dispatch::Ignored
            }
        }
    }

    /// Produce the view for the current mode
    pub fn render(&mut self) -> View {
        self.render_with(|_| {})
    }

    /// Produce the view and hand it to `paint`. A panic while painting the
    /// editor degrades to the fallback; a panic while painting the fallback
    /// moves to the crash banner.
    pub fn render_with(&mut self, mut paint: impl FnMut(&View)) -> View {
        if self.mode.is_normal() {
            let attempt = catch_unwind(AssertUnwindSafe(|| {
                let view = View::Editor(self.editor_view());
                paint(&view);
                view
            }));
            match attempt {
                Ok(view) => return view,
                Err(payload) => {
                    self.degrade(EditorError::from_panic("render", payload), FailureKind::Render)
                }
            }
        }

        if self.mode.is_fallback() {
            let attempt = catch_unwind(AssertUnwindSafe(|| {
                let view = View::Fallback(self.fallback_view());
                paint(&view);
                view
            }));
            match attempt {
                Ok(view) => return view,
                Err(payload) => {
                    let error = EditorError::from_panic("fallback render", payload);
                    tracing::error!(error = %error, "plain-text fallback failed to render");
                    let escalated = self.mode.crash(error.to_string());
                    self.boundary.record_error(
                        FailureKind::Render,
                        error.to_string(),
                        self.mode.display_name(),
                        escalated,
                    );
                }
            }
        }

        let view = View::Crashed(CrashView::default());
        if catch_unwind(AssertUnwindSafe(|| paint(&view))).is_err() {
            tracing::error!("crash banner failed to render");
        }
        view
    }

    fn editor_view(&self) -> EditorView {
        let document = self.engine.document().clone();
        let placeholder = document
            .is_empty()
            .then(|| self.config.placeholder.clone());
        EditorView {
            toolbar: self.toolbar_state(),
            selection: self.engine.selection().clone(),
            document,
            placeholder,
            read_only: self.config.disabled,
            class_name: self.config.class_name.clone(),
            content_height: self.config.content_height(),
        }
    }

    fn fallback_view(&self) -> FallbackView {
        FallbackView {
            value: self.value.clone(),
            notice: FALLBACK_NOTICE.to_string(),
            read_only: self.config.disabled,
            class_name: self.config.class_name.clone(),
            height: self.config.height,
        }
    }

    fn dispatch_link(&mut self, prompt: &mut dyn Prompt) -> Dispatch {
        if !self.mode.is_normal() || self.config.disabled {
            return Dispatch::Ignored;
        }
        if self.engine.is_link_active() {
            return self.guarded("remove link", true, |engine| {
                engine.execute(Box::new(RemoveLink::new()))
            });
        }

        let Some(url) = prompt.link_url() else {
            return Dispatch::Ignored;
        };
        let command = if self.engine.selection().is_collapsed() {
            let Some(text) = prompt.link_text() else {
                return Dispatch::Ignored;
            };
            InsertLink::new(url, text)
        } else {
            InsertLink::wrap(url)
        };
        self.guarded("insert link", true, |engine| engine.execute(Box::new(command)))
    }

    /// Run an engine operation inside the component boundary
    fn guarded(
        &mut self,
        context: &'static str,
        mutating: bool,
        op: impl FnOnce(&mut EditingEngine) -> edit_engine::Result<()>,
    ) -> Dispatch {
        if !self.mode.is_normal() || (mutating && self.config.disabled) {
            return Dispatch::Ignored;
        }

        let before = self.engine.document().clone();
        let engine = &mut self.engine;
        match catch_unwind(AssertUnwindSafe(|| op(engine))) {
            Ok(Ok(())) => {
                if *self.engine.document() != before {
                    self.emit_change();
                }
                Dispatch::Applied
            }
            Ok(Err(e)) if e.is_rejection() => {
                tracing::debug!(action = context, error = %e, "action rejected");
                Dispatch::Ignored
            }
            Ok(Err(e)) => {
                self.degrade(e.into(), FailureKind::Edit);
                Dispatch::Degraded
            }
            Err(payload) => {
                self.degrade(EditorError::from_panic(context, payload), FailureKind::Edit);
                Dispatch::Degraded
            }
        }
    }

    fn emit_change(&mut self) {
        let html = store::serialize(self.engine.document());
        self.value = html.clone();

        let outcome = match self.on_change.as_mut() {
            Some(handler) => catch_unwind(AssertUnwindSafe(|| handler(&html))),
            None => Ok(()),
        };
        if let Err(payload) = outcome {
            self.degrade(EditorError::from_panic("change handler", payload), FailureKind::ChangeHandler);
        }
    }

    fn degrade(&mut self, error: EditorError, kind: FailureKind) {
        let message = error.to_string();
        tracing::error!(error = %message, "rich text editor switched to plain-text fallback");
        let escalated = self.mode.degrade(message.clone());
        self.boundary
            .record_error(kind, message, self.mode.display_name(), escalated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |html: &str| sink.borrow_mut().push(html.to_string()))
    }

    #[test]
    fn test_new_from_html() {
        let editor = RichTextEditor::new(Some("<p>Hello</p>"), EditorConfig::default());
        assert!(editor.mode().is_normal());
        assert_eq!(editor.document().plain_text(), "Hello");
        assert_eq!(editor.value(), "<p>Hello</p>");
    }

    #[test]
    fn test_missing_value_is_empty_document() {
        let mut editor = RichTextEditor::new(None, EditorConfig::default());
        assert!(editor.document().is_empty());
        let view = editor.render();
        let editor_view = view.as_editor().unwrap();
        assert_eq!(editor_view.placeholder.as_deref(), Some("Start typing…"));
        assert!(editor_view.toolbar.is_some());
        assert_eq!(editor_view.content_height, 360);
    }

    #[test]
    fn test_typing_emits_change() {
        let (calls, handler) = recorder();
        let mut editor = RichTextEditor::new(None, EditorConfig::default()).on_change(handler);

        assert_eq!(editor.insert_text("Hi"), Dispatch::Applied);
        assert_eq!(calls.borrow().as_slice(), ["<p>Hi</p>"]);
        assert_eq!(editor.value(), "<p>Hi</p>");
        assert!(editor.render().as_editor().unwrap().placeholder.is_none());
    }

    #[test]
    fn test_selection_change_does_not_emit() {
        let (calls, handler) = recorder();
        let mut editor =
            RichTextEditor::new(Some("<p>Hello</p>"), EditorConfig::default()).on_change(handler);
        assert_eq!(editor.select(Selection::within(vec![0], 1, 3)), Dispatch::Applied);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_stale_selection_is_ignored() {
        let mut editor = RichTextEditor::new(Some("<p>Hello</p>"), EditorConfig::default());
        assert_eq!(editor.select(Selection::within(vec![4], 0, 1)), Dispatch::Ignored);
        assert!(editor.mode().is_normal());
    }

    #[test]
    fn test_set_value_rebuilds_only_on_difference() {
        let mut editor = RichTextEditor::new(Some("<p>One</p>"), EditorConfig::default());
        editor.insert_text("x");
        assert!(editor.engine().can_undo());

        let current = editor.value().to_string();
        assert!(!editor.set_value(&current));
        assert!(editor.engine().can_undo());

        assert!(editor.set_value("<h1>Two</h1>"));
        assert_eq!(editor.document().plain_text(), "Two");
        assert!(!editor.engine().can_undo());
    }

    #[test]
    fn test_disabled_ignores_edits() {
        let (calls, handler) = recorder();
        let mut editor = RichTextEditor::new(Some("<p>Hello</p>"), EditorConfig::default().disabled())
            .on_change(handler);

        assert_eq!(editor.insert_text("x"), Dispatch::Ignored);
        assert_eq!(editor.select(Selection::within(vec![0], 0, 5)), Dispatch::Applied);
        assert_eq!(editor.dispatch(ToolbarAction::Mark(doc_model::Mark::Bold)), Dispatch::Ignored);
        assert!(calls.borrow().is_empty());

        let view = editor.render();
        let editor_view = view.as_editor().unwrap();
        assert!(editor_view.read_only);
        assert!(editor_view.toolbar.is_none());
        assert_eq!(editor_view.content_height, 400);
    }

    #[test]
    fn test_fallback_input_outside_fallback_is_ignored() {
        let mut editor = RichTextEditor::new(Some("<p>Hello</p>"), EditorConfig::default());
        assert_eq!(editor.fallback_input("<p>raw</p>"), Dispatch::Ignored);
        assert_eq!(editor.value(), "<p>Hello</p>");
    }
}
