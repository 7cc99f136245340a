//! XLIFF 1.2 (`<trans-unit>`) and XLIFF 2.0 (`<unit>`) unit handling.
//!
//! Both versions address units by `id` on either element name and keep the
//! translation in a `<target>` next to `<source>`; they differ in where
//! document-wide languages are declared.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    attributes::{Attributes, language},
    locate::{ElementFinder, UnitSpan, locate_unit},
    traits::UnitHandler,
    types::LanguagePair,
};

const UNIT_ELEMENTS: &[&str] = &["trans-unit", "unit"];
const ID_ATTRIBUTES: &[&str] = &["id"];

lazy_static! {
    static ref SOURCE: ElementFinder = ElementFinder::new("source");
    static ref TARGET: ElementFinder = ElementFinder::new("target");
    static ref FILE_TAG_REGEX: Regex = Regex::new(r"(?i)<file(?:\s[^>]*)?>").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V12,
    V20,
}

/// XLIFF unit handler for one version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xliff {
    pub version: Version,
}

pub(crate) static XLIFF_12: Xliff = Xliff {
    version: Version::V12,
};
pub(crate) static XLIFF_20: Xliff = Xliff {
    version: Version::V20,
};

impl UnitHandler for Xliff {
    fn locate_unit(&self, text: &str, key: &str) -> Option<UnitSpan> {
        locate_unit(text, UNIT_ELEMENTS, ID_ATTRIBUTES, key)
    }

    fn extract_source(&self, unit: &str) -> Option<String> {
        SOURCE.find(unit).map(|s| s.inner(unit).to_string())
    }

    fn extract_target(&self, unit: &str) -> Option<String> {
        TARGET.find(unit).map(|t| t.inner(unit).to_string())
    }

    fn substitute_target(&self, unit: &str, replacement: &str) -> Option<String> {
        if let Some(target) = TARGET.find(unit) {
            let (open, close) = if target.self_closing {
                let tag = target.open_tag(unit);
                let open = format!("{}>", tag.trim_end_matches("/>").trim_end());
                (open, "</target>")
            } else {
                (
                    target.open_tag(unit).to_string(),
                    &unit[target.content_end..target.end],
                )
            };
            let mut out = String::with_capacity(unit.len() + replacement.len());
            out.push_str(&unit[..target.start]);
            out.push_str(&open);
            out.push_str(replacement);
            out.push_str(close);
            out.push_str(&unit[target.end..]);
            return Some(out);
        }

        let source = SOURCE.find(unit)?;
        let mut out = String::with_capacity(unit.len() + replacement.len() + 32);
        out.push_str(&unit[..source.end]);
        if let Some(indent) = line_indent(unit, source.start) {
            out.push('\n');
            out.push_str(indent);
        }
        out.push_str("<target>");
        out.push_str(replacement);
        out.push_str("</target>");
        out.push_str(&unit[source.end..]);
        Some(out)
    }

    fn document_languages(&self, document: &str) -> LanguagePair {
        let file = FILE_TAG_REGEX
            .find(document)
            .map(|m| Attributes::parse(m.as_str()))
            .unwrap_or_default();
        let from_file = LanguagePair::new(
            language(&file, &["source-language"]),
            language(&file, &["target-language"]),
        );
        match self.version {
            Version::V12 => from_file,
            Version::V20 => {
                let root = super::XLIFF_ROOT_REGEX
                    .find(document)
                    .map(|m| Attributes::parse(m.as_str()))
                    .unwrap_or_default();
                LanguagePair::new(language(&root, &["srcLang"]), language(&root, &["trgLang"]))
                    .or(&from_file)
            }
        }
    }

    fn unit_languages(&self, unit: &str, inherited: &LanguagePair) -> LanguagePair {
        let open_tag = match unit.find('>') {
            Some(end) => &unit[..=end],
            None => unit,
        };
        let attrs = Attributes::parse(open_tag);
        LanguagePair::new(
            language(&attrs, &["source-language"]),
            language(&attrs, &["target-language"]),
        )
        .or(inherited)
    }
}

/// The whitespace run before `pos` when `pos` starts its own line.
fn line_indent(text: &str, pos: usize) -> Option<&str> {
    let line_start = text[..pos].rfind('\n')? + 1;
    let indent = &text[line_start..pos];
    indent.chars().all(char::is_whitespace).then_some(indent)
}
