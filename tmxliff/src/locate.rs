//! Locating translation units and their child elements in raw document text.
//!
//! Documents are never re-serialized: every lookup returns byte offsets into
//! the caller's string so edits can be spliced in with everything outside
//! the edited span left byte-for-byte intact.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::escape::encode_entities;

/// Byte offsets of one unit element inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSpan {
    /// Start of the opening tag.
    pub start: usize,
    /// End of the opening tag (start of inner content).
    pub content_start: usize,
    /// Start of the closing tag (end of inner content).
    pub content_end: usize,
    /// End of the closing tag.
    pub end: usize,
}

impl UnitSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn open_tag<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.content_start]
    }

    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.content_end]
    }

    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Offsets of one child element, relative to the text it was searched in.
///
/// For a self-closing element (`<target/>`) the content range is empty and
/// sits at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan {
    pub start: usize,
    pub content_start: usize,
    pub content_end: usize,
    pub end: usize,
    pub self_closing: bool,
}

impl ElementSpan {
    pub fn open_tag<'a>(&self, text: &'a str) -> &'a str {
        if self.self_closing {
            &text[self.start..self.end]
        } else {
            &text[self.start..self.content_start]
        }
    }

    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.content_end]
    }

    /// Shifts offsets found in a sub-slice back to the enclosing text.
    pub fn offset(self, by: usize) -> Self {
        ElementSpan {
            start: self.start + by,
            content_start: self.content_start + by,
            content_end: self.content_end + by,
            end: self.end + by,
            self_closing: self.self_closing,
        }
    }
}

/// Finds the first unit element named one of `elements` whose attribute named
/// one of `id_attributes` equals `key` exactly.
///
/// Element and attribute names match case-insensitively, the key value
/// case-sensitively. The key is regex-escaped, so any character in it is
/// taken literally. It matches the attribute value as written or with the
/// predefined XML entities applied, so `a&b` finds `id="a&amp;b"`.
/// Self-closing units (`<trans-unit id="1"/>`) have no content and never match.
pub fn locate_unit(
    text: &str,
    elements: &[&str],
    id_attributes: &[&str],
    key: &str,
) -> Option<UnitSpan> {
    let pattern = unit_pattern(elements, id_attributes, key);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!(key, error = %e, "unit key produced an unusable pattern");
            return None;
        }
    };
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(UnitSpan {
        start: whole.start(),
        content_start: inner.start(),
        content_end: inner.end(),
        end: whole.end(),
    })
}

fn unit_pattern(elements: &[&str], id_attributes: &[&str], key: &str) -> String {
    let names = alternation(elements);
    let ids = alternation(id_attributes);
    let encoded = encode_entities(key);
    let key = if encoded == key {
        regex::escape(key)
    } else {
        format!("{}|{}", regex::escape(key), regex::escape(&encoded))
    };
    format!(
        r#"(?i:<(?:{names})\s(?:[^>]*?\s)?(?:{ids})\s*=\s*)(?:"(?:{key})"|'(?:{key})')(?i:(?:[^>]*[^/>])?>)([\s\S]*?)(?i:</(?:{names})\s*>)"#
    )
}

fn alternation(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled finder for one child element name (`source`, `target`, `seg`, `tuv`).
pub struct ElementFinder {
    open: Regex,
    close: Regex,
}

impl ElementFinder {
    pub fn new(name: &str) -> Self {
        let name = regex::escape(name);
        // Literal patterns built from a fixed element name; they always compile.
        let open = RegexBuilder::new(&format!(r"<{name}(?:\s[^>]*)?/?>"))
            .case_insensitive(true)
            .build()
            .unwrap();
        let close = RegexBuilder::new(&format!(r"</{name}\s*>"))
            .case_insensitive(true)
            .build()
            .unwrap();
        ElementFinder { open, close }
    }

    /// First element in `text`, or `None` if no complete element is present.
    pub fn find(&self, text: &str) -> Option<ElementSpan> {
        self.find_from(text, 0)
    }

    /// First element starting at or after byte `from`.
    pub fn find_from(&self, text: &str, from: usize) -> Option<ElementSpan> {
        let open = self.open.find_at(text, from)?;
        if open.as_str().ends_with("/>") {
            return Some(ElementSpan {
                start: open.start(),
                content_start: open.end(),
                content_end: open.end(),
                end: open.end(),
                self_closing: true,
            });
        }
        let close = self.close.find_at(text, open.end())?;
        Some(ElementSpan {
            start: open.start(),
            content_start: open.end(),
            content_end: close.start(),
            end: close.end(),
            self_closing: false,
        })
    }

    /// All non-overlapping elements in document order.
    pub fn find_all(&self, text: &str) -> Vec<ElementSpan> {
        let mut out = Vec::new();
        let mut from = 0;
        while let Some(span) = self.find_from(text, from) {
            from = span.end;
            out.push(span);
        }
        out
    }
}
