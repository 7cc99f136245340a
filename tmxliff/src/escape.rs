//! Minimal XML entity handling for raw segment text.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENTITY_REGEX: Regex = Regex::new(r"&(amp|lt|gt|quot|apos);").unwrap();
}

/// Decodes the five predefined XML entities in a single left-to-right pass.
///
/// The output of one replacement is never rescanned, so `&amp;lt;` becomes
/// `&lt;`, not `<`. Anything else that looks like an entity is left alone.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    ENTITY_REGEX.replace_all(input, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        _ => "'",
    })
}

/// Applies the five predefined XML entities, `&` first.
pub fn encode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
