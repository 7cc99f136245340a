//! Supported interchange formats and their dialects.
//!
//! [`FormatType`] is what a caller talks about (XLIFF, TMX), [`detect_format`]
//! guesses it from raw text, and [`Dialect`] is the concrete variant the
//! engine dispatches on (XLIFF 1.2, XLIFF 2.0, TMX). Each dialect hands out a
//! [`UnitHandler`] that implements addressing, extraction and patching.

pub mod tmx;
pub mod xliff;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;

pub use tmx::Tmx;
pub use xliff::Xliff;

use crate::{
    Error,
    attributes::{Attributes, XLIFF_20_NS},
    outline::Layout,
    traits::UnitHandler,
};

/// Document families the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// XLIFF 1.2 or 2.0.
    Xliff,
    /// TMX.
    Tmx,
    /// Neither signature was found.
    Unrecognized,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// ```rust
/// use tmxliff::formats::FormatType;
/// assert_eq!(FormatType::Xliff.to_string(), "XLIFF");
/// assert_eq!(FormatType::Tmx.to_string(), "TMX");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Xliff => write!(f, "XLIFF"),
            FormatType::Tmx => write!(f, "TMX"),
            FormatType::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Accepts `xliff`, `xlf`, `xlif` and `tmx`, case-insensitively.
///
/// Returns [`crate::error::Error::UnknownFormat`] for anything else.
///
/// ```rust
/// use tmxliff::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("XLF").unwrap(), FormatType::Xliff);
/// assert!(FormatType::from_str("po").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "xliff" | "xlf" | "xlif" => Ok(FormatType::Xliff),
            "tmx" => Ok(FormatType::Tmx),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FormatType::Unrecognized)
    }
}

/// Classifies raw text by looking for dialect signatures.
///
/// `<xliff`, `<trans-unit` or `<unit` means XLIFF; otherwise `<tmx` or `<tu`
/// means TMX. This is a heuristic, not a schema check: malformed or mixed
/// input can be misrouted.
///
/// ```rust
/// use tmxliff::{FormatType, detect_format};
/// assert_eq!(detect_format(r#"<xliff version="1.2">"#), FormatType::Xliff);
/// assert_eq!(detect_format("<TMX version=\"1.4\">"), FormatType::Tmx);
/// assert_eq!(detect_format("<resources/>"), FormatType::Unrecognized);
/// ```
pub fn detect_format(raw: &str) -> FormatType {
    let lower = raw.to_lowercase();
    if ["<xliff", "<trans-unit", "<unit"]
        .iter()
        .any(|sig| lower.contains(sig))
    {
        FormatType::Xliff
    } else if ["<tmx", "<tu"].iter().any(|sig| lower.contains(sig)) {
        FormatType::Tmx
    } else {
        FormatType::Unrecognized
    }
}

/// The concrete document dialect the engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Xliff12,
    Xliff20,
    Tmx,
}

lazy_static! {
    static ref XLIFF_ROOT_REGEX: Regex = Regex::new(r"(?i)<xliff(?:\s[^>]*)?>").unwrap();
}

impl Dialect {
    /// Picks the dialect for a document of the given format.
    ///
    /// XLIFF is 2.0 when the root declares `version="2.x"` or the 2.0
    /// namespace, or, with no `<xliff>` root at all, when units are `<unit>`
    /// rather than `<trans-unit>`. Returns `None` for
    /// [`FormatType::Unrecognized`].
    pub fn for_document(raw: &str, format: FormatType) -> Option<Self> {
        match format {
            FormatType::Tmx => Some(Dialect::Tmx),
            FormatType::Xliff => Some(xliff_version(raw)),
            FormatType::Unrecognized => None,
        }
    }

    /// The handler implementing this dialect's unit operations.
    pub fn handler(self) -> &'static dyn UnitHandler {
        match self {
            Dialect::Xliff12 => &xliff::XLIFF_12,
            Dialect::Xliff20 => &xliff::XLIFF_20,
            Dialect::Tmx => &tmx::TMX,
        }
    }

    pub fn format(self) -> FormatType {
        match self {
            Dialect::Xliff12 | Dialect::Xliff20 => FormatType::Xliff,
            Dialect::Tmx => FormatType::Tmx,
        }
    }

    pub(crate) fn layout(self) -> Layout {
        match self {
            Dialect::Xliff12 | Dialect::Xliff20 => Layout::Xliff,
            Dialect::Tmx => Layout::Tmx,
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Xliff12 => write!(f, "XLIFF 1.2"),
            Dialect::Xliff20 => write!(f, "XLIFF 2.0"),
            Dialect::Tmx => write!(f, "TMX"),
        }
    }
}

fn xliff_version(raw: &str) -> Dialect {
    if let Some(root) = XLIFF_ROOT_REGEX.find(raw) {
        let attrs = Attributes::parse(root.as_str());
        let v2 = attrs
            .get("version")
            .is_some_and(|v| v.trim().starts_with('2'))
            || attrs.get("xmlns") == Some(XLIFF_20_NS);
        return if v2 { Dialect::Xliff20 } else { Dialect::Xliff12 };
    }
    let lower = raw.to_lowercase();
    if lower.contains("<unit") && !lower.contains("<trans-unit") {
        Dialect::Xliff20
    } else {
        Dialect::Xliff12
    }
}
