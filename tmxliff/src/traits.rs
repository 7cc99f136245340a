//! The capability set every document dialect provides.

use crate::{locate::UnitSpan, types::LanguagePair};

/// Per-dialect unit addressing, extraction and patching.
///
/// Implementors are zero-sized and stateless; every method works on the text
/// it is given and returns offsets or new strings. `unit` arguments are the
/// full text of one unit element, opening and closing tag included.
///
/// # Example
///
/// ```rust
/// use tmxliff::formats::Dialect;
///
/// let doc = r#"<tmx><body><tu tuid="1"><tuv xml:lang="en"><seg>Hi</seg></tuv><tuv xml:lang="de"><seg></seg></tuv></tu></body></tmx>"#;
/// let handler = Dialect::Tmx.handler();
/// let span = handler.locate_unit(doc, "1").unwrap();
/// let unit = span.as_str(doc);
/// assert_eq!(handler.extract_source(unit).as_deref(), Some("Hi"));
/// assert!(handler.substitute_target(unit, "Hallo").unwrap().contains("<seg>Hallo</seg>"));
/// ```
pub trait UnitHandler: Sync {
    /// Finds the first unit addressed by `key` in `text`.
    fn locate_unit(&self, text: &str, key: &str) -> Option<UnitSpan>;

    /// Raw inner markup of the unit's source text, if present.
    fn extract_source(&self, unit: &str) -> Option<String>;

    /// Raw inner markup of the unit's target text, if present.
    fn extract_target(&self, unit: &str) -> Option<String>;

    /// Returns the unit text with its target content replaced by `replacement`,
    /// or `None` when the dialect cannot place a target in this unit.
    fn substitute_target(&self, unit: &str, replacement: &str) -> Option<String>;

    /// Languages declared once for the whole document, inherited by units
    /// that declare none of their own.
    fn document_languages(&self, _document: &str) -> LanguagePair {
        LanguagePair::default()
    }

    /// Source and target language for one unit, lower-cased. Each side falls
    /// back to `inherited` when the unit does not declare it; `""` if unknown.
    fn unit_languages(&self, unit: &str, inherited: &LanguagePair) -> LanguagePair;
}
