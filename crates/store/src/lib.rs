//! Store - HTML persistence for rich-text documents
//!
//! The host application stores documents as HTML fragments. This crate
//! converts between those fragments and [`doc_model::Document`]:
//! [`deserialize`] and [`serialize`] never fail, substituting the canonical
//! empty document or an empty string, while [`HtmlReader`] and
//! [`HtmlWriter`] report the underlying error.

mod error;
pub mod html;

pub use error::*;
pub use html::{deserialize, serialize, HtmlReader, HtmlWriter, MAX_NESTING};
