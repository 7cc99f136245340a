//! All error types for the tmxliff crate.
//!
//! Per-unit problems (unit not found, missing `<target>`, empty replacement text)
//! are never errors: they are skipped and simply not counted.

use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The structural parser could not read the document at all.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Creates an [`Error::InvalidDocument`] from any parser message.
    pub fn invalid_document(message: impl Display) -> Self {
        Error::InvalidDocument(message.to_string())
    }

    /// The bare parser message, without the `invalid document:` prefix.
    pub fn message(&self) -> String {
        match self {
            Error::InvalidDocument(message)
            | Error::UnknownFormat(message)
            | Error::UnsupportedFormat(message) => message.clone(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::invalid_document(value)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::invalid_document(value)
    }
}
