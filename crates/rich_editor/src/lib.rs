//! Rich Editor - the rich-text editing component
//!
//! Wraps an [`edit_engine::EditingEngine`] with HTML persistence, a
//! toolbar that reflects the current selection, keyboard shortcuts, and
//! a three-state failure model: the editor degrades to a raw HTML text
//! area when the document layer fails, and to a crash banner if even that
//! cannot render.

mod boundary;
mod component;
mod config;
mod error;
mod mode;
mod prompt;
mod shortcuts;
mod toolbar;
mod view;

pub use boundary::*;
pub use component::*;
pub use config::*;
pub use error::*;
pub use mode::*;
pub use prompt::*;
pub use shortcuts::*;
pub use toolbar::*;
pub use view::*;
