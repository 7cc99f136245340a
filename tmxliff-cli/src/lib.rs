//! CLI library for testing purposes

pub mod input;
pub mod validation;

pub use input::{read_document, read_entries, resolve_format};
pub use tmxliff::Codec;
