//! Document Model - Rich-text document tree and selection types
//!
//! A document is an ordered list of block nodes. Elements carry a closed
//! [`ElementKind`], optional alignment, and children; text leaves carry the
//! inline marks. Selections address text blocks by child-index path and a
//! grapheme offset into the block's text.

mod node;
mod text;
mod inline;
mod document;
mod selection;
mod error;

pub use node::*;
pub use text::*;
pub use inline::InlineSpan;
pub use document::*;
pub use selection::*;
pub use error::*;
