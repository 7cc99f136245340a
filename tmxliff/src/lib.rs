#![forbid(unsafe_code)]
//! Format-preserving extraction and patching for XLIFF and TMX documents.
//!
//! Translation units are read out of XLIFF 1.2, XLIFF 2.0 and TMX files, and
//! translated text is written back into them without re-serializing the
//! document: only the inner text of the addressed `<target>` (or TMX `<seg>`)
//! changes, everything else stays byte-for-byte as it was.
//!
//! # Quick Start
//!
//! ```rust
//! use tmxliff::{Codec, ReplacementEntry};
//!
//! let doc = r#"<xliff version="1.2"><file source-language="en" target-language="zh"><body>
//!   <trans-unit id="exit"><source>Exit</source><target></target></trans-unit>
//! </body></file></xliff>"#;
//!
//! let codec = Codec::new(doc);
//! let units = codec.units()?;
//! assert_eq!(units[0].source, "Exit");
//!
//! let result = codec.apply_replacements(&[ReplacementEntry::for_unit("exit", "退出")])?;
//! assert!(result.patched_text.contains("<target>退出</target>"));
//! # Ok::<(), tmxliff::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **XLIFF 1.2**: `<trans-unit>` units, languages from `<file>`
//! - **XLIFF 2.0**: `<unit>` units, languages from the `<xliff>` root
//! - **TMX**: `<tu>` units, source and target from the first two `<tuv>`

pub mod attributes;
pub mod codec;
pub mod error;
pub mod escape;
pub mod extract;
pub mod formats;
pub mod locate;
pub mod options;
pub mod outline;
pub mod patch;
pub mod placeholder;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::Codec,
    error::Error,
    extract::{extract_units, extract_units_with, validate},
    formats::{Dialect, FormatType, detect_format},
    options::ExtractOptions,
    patch::{apply_replacements, apply_replacements_auto},
    placeholder::normalize_segment,
    traits::UnitHandler,
    types::{LanguagePair, PatchResult, ReplacementEntry, TranslationUnit, ValidationReport},
};
