//! Out-of-band input for the link control

/// Asks the user for link details; `None` means the user cancelled
pub trait Prompt {
    fn link_url(&mut self) -> Option<String>;

    fn link_text(&mut self) -> Option<String>;
}

/// A prompt that always cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn link_url(&mut self) -> Option<String> {
        None
    }

    fn link_text(&mut self) -> Option<String> {
        None
    }
}

/// Prompt answers fixed up front
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt {
    pub url: Option<String>,
    pub text: Option<String>,
}

impl FixedPrompt {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            text: Some(text.into()),
        }
    }

    pub fn url_only(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            text: None,
        }
    }
}

impl Prompt for FixedPrompt {
    fn link_url(&mut self) -> Option<String> {
        self.url.clone()
    }

    fn link_text(&mut self) -> Option<String> {
        self.text.clone()
    }
}
