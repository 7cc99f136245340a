/// This module provides the `Codec` struct, a short-lived handle over one
/// XLIFF or TMX document held as text.
///
/// A `Codec` borrows the caller's string, works out the format once (either
/// given explicitly or detected from the text) and exposes the read, validate
/// and patch operations against it. It holds no other state and is meant to be
/// built fresh for every document.
///
use std::str::FromStr;

use crate::{
    error::Error,
    extract::{extract_units_with, validate},
    formats::{Dialect, FormatType, detect_format},
    options::ExtractOptions,
    patch::apply_replacements,
    types::{PatchResult, ReplacementEntry, TranslationUnit, ValidationReport},
};

/// One document and the format it is processed as.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    raw: &'a str,
    format: FormatType,
    options: ExtractOptions,
}

impl<'a> Codec<'a> {
    /// Creates a codec with the format detected from `raw`.
    ///
    /// The format may come out as [`FormatType::Unrecognized`]; operations
    /// then fail or leave the text alone as documented on each of them.
    pub fn new(raw: &'a str) -> Self {
        Codec::with_format(raw, detect_format(raw))
    }

    /// Creates a codec that treats `raw` as `format` without detection.
    pub fn with_format(raw: &'a str, format: FormatType) -> Self {
        Codec {
            raw,
            format,
            options: ExtractOptions::default(),
        }
    }

    /// Creates a codec from a format name (`xliff`, `xlf`, `tmx`) or `auto`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tmxliff::{Codec, FormatType};
    ///
    /// let codec = Codec::from_format_name("<tmx/>", "auto").unwrap();
    /// assert_eq!(codec.format(), FormatType::Tmx);
    /// assert!(Codec::from_format_name("<tmx/>", "po").is_err());
    /// ```
    pub fn from_format_name(raw: &'a str, name: &str) -> Result<Self, Error> {
        if name.trim().eq_ignore_ascii_case("auto") {
            Ok(Codec::new(raw))
        } else {
            Ok(Codec::with_format(raw, FormatType::from_str(name)?))
        }
    }

    /// Replaces the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> FormatType {
        self.format
    }

    /// The concrete dialect, or `None` when the format is unrecognized.
    pub fn dialect(&self) -> Option<Dialect> {
        Dialect::for_document(self.raw, self.format)
    }

    pub fn text(&self) -> &'a str {
        self.raw
    }

    /// Extracts all units with the codec's options.
    pub fn units(&self) -> Result<Vec<TranslationUnit>, Error> {
        extract_units_with(self.raw, self.format, self.options)
    }

    /// Validates the document as the codec's format.
    pub fn validate(&self) -> ValidationReport {
        validate(self.raw, self.format)
    }

    /// Patches `entries` into the document.
    ///
    /// Fails with [`Error::UnknownFormat`] when the format is unrecognized, so
    /// an undetectable document is reported rather than echoed back.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tmxliff::{Codec, ReplacementEntry};
    ///
    /// let doc = r#"<tmx><body><tu tuid="1"><tuv xml:lang="en"><seg>Hi</seg></tuv><tuv xml:lang="de"><seg/></tuv></tu></body></tmx>"#;
    /// let result = Codec::new(doc)
    ///     .apply_replacements(&[ReplacementEntry::for_unit("1", "Hallo")])
    ///     .unwrap();
    /// assert_eq!(result.applied_count, 1);
    /// assert!(result.patched_text.contains("<seg>Hallo</seg>"));
    /// ```
    pub fn apply_replacements(&self, entries: &[ReplacementEntry]) -> Result<PatchResult, Error> {
        if !self.format.is_recognized() {
            return Err(Error::UnknownFormat(
                "no XLIFF or TMX signature found".to_string(),
            ));
        }
        Ok(apply_replacements(self.raw, self.format, entries))
    }
}
