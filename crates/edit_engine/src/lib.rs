//! Edit Engine - Command system, formatting queries, and undo/redo
//!
//! Every formatting operation is a [`Command`] applied to an owned
//! [`doc_model::Document`] and [`doc_model::Selection`]; the
//! [`EditingEngine`] owns both plus the history.

mod command;
mod executor;
mod undo;
mod error;
mod query;
mod format_commands;
mod paragraph_commands;
mod list_commands;
mod hyperlink_commands;

pub use command::*;
pub use executor::*;
pub use undo::*;
pub use error::*;
pub use query::*;
pub use format_commands::*;
pub use paragraph_commands::*;
pub use hyperlink_commands::*;
