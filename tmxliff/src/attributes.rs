//! Attribute lookup on raw opening tags: match percent and language tags.
//!
//! Everything here works on the literal text of an opening tag such as
//! `<trans-unit id="1" mq:percent="75">`. Missing or malformed values degrade
//! to sentinels (`-1.0` for percent, `""` for languages) instead of failing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::escape::decode_entities;

/// Sentinel for "no match percent present".
pub const NO_PERCENT: f64 = -1.0;

pub const XLIFF_12_NS: &str = "urn:oasis:names:tc:xliff:document:1.2";
pub const XLIFF_20_NS: &str = "urn:oasis:names:tc:xliff:document:2.0";

lazy_static! {
    static ref ATTRIBUTE_REGEX: Regex =
        Regex::new(r#"([A-Za-z_][\w.\-]*(?::[A-Za-z_][\w.\-]*)?)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .unwrap();
    static ref TAG_NAME_REGEX: Regex = Regex::new(r"^<\s*[^\s/>]+").unwrap();
}

/// Attributes of one opening tag, in source order, values entity-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    /// Scans the attributes of a raw opening tag.
    ///
    /// The element name is skipped; names are kept as written (with prefix).
    pub fn parse(open_tag: &str) -> Self {
        let body = match TAG_NAME_REGEX.find(open_tag) {
            Some(m) => &open_tag[m.end()..],
            None => open_tag,
        };
        let pairs = ATTRIBUTE_REGEX
            .captures_iter(body)
            .map(|caps| {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                (caps[1].to_string(), decode_entities(value).into_owned())
            })
            .collect();
        Attributes { pairs }
    }

    /// Value of the first attribute whose name matches ASCII case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Like [`Attributes::get`] but treats an empty value as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Value of `prefix:local` for any prefix bound to `namespace`.
    fn get_namespaced(&self, local: &str, namespace: &str, bindings: &[(String, String)]) -> Option<&str> {
        bindings
            .iter()
            .filter(|(_, uri)| uri == namespace)
            .find_map(|(prefix, _)| self.get_non_empty(&format!("{prefix}:{local}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Namespace prefix declarations (`xmlns:p="uri"`) found anywhere in a document.
pub fn namespace_bindings(document: &str) -> Vec<(String, String)> {
    lazy_static! {
        static ref XMLNS_REGEX: Regex =
            Regex::new(r#"xmlns:([A-Za-z_][\w.\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    }
    XMLNS_REGEX
        .captures_iter(document)
        .map(|caps| {
            let uri = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
            (caps[1].to_string(), uri.unwrap_or_default().to_string())
        })
        .collect()
}

/// Reads the match percent from a unit's opening tag.
///
/// Spellings are tried in order: `percent`, `mq:percent`, then `percent` under
/// a prefix bound to the XLIFF 1.2 namespace, then the XLIFF 2.0 namespace.
/// The first non-empty value wins; if it does not parse as a float the result
/// is [`NO_PERCENT`].
pub fn match_percent(open_tag: &str, bindings: &[(String, String)]) -> f64 {
    let attrs = Attributes::parse(open_tag);
    let value = attrs
        .get_non_empty("percent")
        .or_else(|| attrs.get_non_empty("mq:percent"))
        .or_else(|| attrs.get_namespaced("percent", XLIFF_12_NS, bindings))
        .or_else(|| attrs.get_namespaced("percent", XLIFF_20_NS, bindings));

    match value {
        Some(v) => v.trim().parse::<f64>().unwrap_or(NO_PERCENT),
        None => NO_PERCENT,
    }
}

/// First non-empty attribute among `names`, lower-cased; `""` if none.
pub fn language(attrs: &Attributes, names: &[&str]) -> String {
    names
        .iter()
        .find_map(|name| attrs.get_non_empty(name))
        .map(|lang| lang.trim().to_lowercase())
        .unwrap_or_default()
}
