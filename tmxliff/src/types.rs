//! Records passed across the engine boundary.
//!
//! All of these are built fresh for each call and hold owned data only.

use serde::{Deserialize, Serialize};

use crate::attributes::NO_PERCENT;

/// One translation unit read from a document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    /// 1-based position among non-header units, in document order.
    pub seg_number: usize,

    /// Format-native identifier (`trans-unit@id`, `unit@id`, `tu@tuid`).
    /// Not guaranteed to be unique.
    pub unit_id: String,

    pub source: String,
    pub target: String,

    /// Match quality, or `-1.0` when the unit carries none.
    pub match_percent: f64,

    pub source_lang: String,
    pub target_lang: String,

    /// TMX `<prop type="x-context">` text.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context_id: Option<String>,

    /// TMX `tu@creationid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub creator: Option<String>,

    /// TMX `tu@changeid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub changer: Option<String>,

    /// TMX source with vendor placeholders normalized away.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub no_tag_source: Option<String>,

    /// TMX target with vendor placeholders normalized away.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub no_tag_target: Option<String>,
}

impl TranslationUnit {
    pub(crate) fn new(seg_number: usize, unit_id: impl Into<String>) -> Self {
        TranslationUnit {
            seg_number,
            unit_id: unit_id.into(),
            source: String::new(),
            target: String::new(),
            match_percent: NO_PERCENT,
            source_lang: String::new(),
            target_lang: String::new(),
            context_id: None,
            creator: None,
            changer: None,
            no_tag_source: None,
            no_tag_target: None,
        }
    }

    /// Whether the unit carries a match percent.
    pub fn has_match_percent(&self) -> bool {
        self.match_percent >= 0.0
    }

    /// Whether the target is still empty.
    pub fn is_untranslated(&self) -> bool {
        self.target.trim().is_empty()
    }
}

/// A source/target language pair, lower-cased; either side may be `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        LanguagePair {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Fills empty sides from `fallback`.
    pub fn or(self, fallback: &LanguagePair) -> Self {
        LanguagePair {
            source: if self.source.is_empty() {
                fallback.source.clone()
            } else {
                self.source
            },
            target: if self.target.is_empty() {
                fallback.target.clone()
            } else {
                self.target
            },
        }
    }
}

/// A translation to write back into a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementEntry {
    /// Ordinal of the unit, used as the key when `unit_id` is absent.
    #[serde(default)]
    pub seg_number: usize,

    /// Native unit id; preferred key.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub unit_id: Option<String>,

    /// Preferred replacement text.
    #[serde(alias = "aiResult")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub primary_text: Option<String>,

    /// Replacement text used when `primary_text` is empty.
    #[serde(alias = "mtResult")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub secondary_text: Option<String>,
}

impl ReplacementEntry {
    /// Entry addressed by native unit id.
    pub fn for_unit(unit_id: impl Into<String>, text: impl Into<String>) -> Self {
        ReplacementEntry {
            unit_id: Some(unit_id.into()),
            primary_text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Entry addressed by ordinal only.
    pub fn for_seg_number(seg_number: usize, text: impl Into<String>) -> Self {
        ReplacementEntry {
            seg_number,
            primary_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    /// The key used to locate the unit: the unit id if present, otherwise the
    /// stringified ordinal.
    pub fn unit_key(&self) -> String {
        match self.unit_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.seg_number.to_string(),
        }
    }

    /// `primary_text` if non-empty, else `secondary_text` if non-empty.
    pub fn replacement_text(&self) -> Option<&str> {
        fn non_empty(text: &Option<String>) -> Option<&str> {
            text.as_deref().filter(|t| !t.is_empty())
        }
        non_empty(&self.primary_text).or_else(|| non_empty(&self.secondary_text))
    }
}

/// Output of a replacement run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchResult {
    /// The full document; identical to the input outside patched spans.
    pub patched_text: String,
    /// Number of units actually rewritten.
    pub applied_count: usize,
}

/// Outcome of a document validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
    pub unit_count: usize,
}
