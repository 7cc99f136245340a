//! Write pipeline: patches translated text into a document in place.
//!
//! Units are located and rewritten directly in the raw text. The document is
//! never re-serialized, so everything outside a rewritten `<target>` / `<seg>`
//! stays byte-for-byte as the caller sent it.

use crate::{
    error::Error,
    formats::{Dialect, FormatType, detect_format},
    types::{PatchResult, ReplacementEntry},
};

/// Applies `entries` to `raw`, in the order given.
///
/// Each entry is located against the text as patched so far. Entries with no
/// usable text, keys that match no unit, and units with nowhere to put a
/// target are skipped without error and not counted. For
/// [`FormatType::Unrecognized`] the text comes back unchanged.
///
/// ```rust
/// use tmxliff::{FormatType, ReplacementEntry, apply_replacements};
///
/// let doc = r#"<trans-unit id="3"><source>Exit</source><target></target></trans-unit>"#;
/// let entries = [ReplacementEntry::for_unit("3", "退出应用程序")];
///
/// let result = apply_replacements(doc, FormatType::Xliff, &entries);
/// assert_eq!(result.applied_count, 1);
/// assert!(result.patched_text.contains("<target>退出应用程序</target>"));
/// ```
pub fn apply_replacements(
    raw: &str,
    format: FormatType,
    entries: &[ReplacementEntry],
) -> PatchResult {
    let Some(dialect) = Dialect::for_document(raw, format) else {
        tracing::debug!(entries = entries.len(), "unrecognized format, nothing replaced");
        return PatchResult {
            patched_text: raw.to_string(),
            applied_count: 0,
        };
    };
    let handler = dialect.handler();

    let mut text = raw.to_string();
    let mut applied_count = 0;
    for entry in entries {
        let key = entry.unit_key();
        let Some(replacement) = entry.replacement_text() else {
            tracing::debug!(key = %key, "skipping entry without replacement text");
            continue;
        };
        let Some(span) = handler.locate_unit(&text, &key) else {
            tracing::debug!(key = %key, "unit not found");
            continue;
        };
        let Some(patched) = handler.substitute_target(span.as_str(&text), replacement) else {
            tracing::debug!(key = %key, %dialect, "unit has no place for a target");
            continue;
        };
        text.replace_range(span.range(), &patched);
        applied_count += 1;
    }

    tracing::debug!(%dialect, applied_count, entries = entries.len(), "applied replacements");
    PatchResult {
        patched_text: text,
        applied_count,
    }
}

/// Detects the format of `raw` first, then behaves like [`apply_replacements`].
///
/// # Errors
///
/// [`Error::UnknownFormat`] when no XLIFF or TMX signature is found.
pub fn apply_replacements_auto(
    raw: &str,
    entries: &[ReplacementEntry],
) -> Result<PatchResult, Error> {
    match detect_format(raw) {
        FormatType::Unrecognized => Err(Error::UnknownFormat(
            "no XLIFF or TMX signature found".to_string(),
        )),
        format => Ok(apply_replacements(raw, format, entries)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLIFF: &str = r#"<xliff version="1.2"><file><body>
      <trans-unit id="1">
        <source>Open</source>
        <target state="translated">打开</target>
      </trans-unit>
      <trans-unit id="3">
        <source>Exit</source>
      </trans-unit>
    </body></file></xliff>"#;

    const TMX: &str = r#"<tmx version="1.4"><body>
      <tu tuid="1"><tuv xml:lang="en"><seg>One</seg></tuv><tuv xml:lang="zh"><seg>一</seg></tuv></tu>
      <tu tuid="2"><tuv xml:lang="en"><seg>Two</seg></tuv></tu>
      <tu tuid="3"><tuv xml:lang="en"><seg>Three</seg></tuv><tuv xml:lang="zh"><seg></seg></tuv></tu>
    </body></tmx>"#;

    #[test]
    fn test_replace_existing_target() {
        let result = apply_replacements(
            XLIFF,
            FormatType::Xliff,
            &[ReplacementEntry::for_unit("1", "开启")],
        );
        assert_eq!(result.applied_count, 1);
        assert!(result.patched_text.contains(r#"<target state="translated">开启</target>"#));
        assert!(!result.patched_text.contains("打开"));
    }

    #[test]
    fn test_insert_missing_target() {
        let result = apply_replacements(
            XLIFF,
            FormatType::Xliff,
            &[ReplacementEntry::for_unit("3", "退出应用程序")],
        );
        assert_eq!(result.applied_count, 1);
        assert!(result.patched_text.contains(
            "<source>Exit</source>\n        <target>退出应用程序</target>\n      </trans-unit>"
        ));
    }

    #[test]
    fn test_secondary_text_used_when_primary_empty() {
        let entry = ReplacementEntry::for_unit("1", "").with_secondary("mt");
        let result = apply_replacements(XLIFF, FormatType::Xliff, &[entry]);
        assert_eq!(result.applied_count, 1);
        assert!(result.patched_text.contains(">mt</target>"));
    }

    #[test]
    fn test_skips_are_not_counted() {
        let entries = [
            ReplacementEntry::for_unit("missing", "x"),
            ReplacementEntry::for_unit("1", ""),
            ReplacementEntry::for_unit("3", "ok"),
        ];
        let result = apply_replacements(XLIFF, FormatType::Xliff, &entries);
        assert_eq!(result.applied_count, 1);
    }

    #[test]
    fn test_later_entries_see_earlier_edits() {
        let entries = [
            ReplacementEntry::for_unit("3", "first"),
            ReplacementEntry::for_unit("3", "second"),
        ];
        let result = apply_replacements(XLIFF, FormatType::Xliff, &entries);
        assert_eq!(result.applied_count, 2);
        assert!(result.patched_text.contains("<target>second</target>"));
        assert!(!result.patched_text.contains("first"));
        assert_eq!(result.patched_text.matches("<target>").count(), 1);
    }

    #[test]
    fn test_tmx_by_seg_number() {
        let result = apply_replacements(
            TMX,
            FormatType::Tmx,
            &[ReplacementEntry::for_seg_number(3, "三")],
        );
        assert_eq!(result.applied_count, 1);
        assert!(result
            .patched_text
            .contains(r#"<tuv xml:lang="zh"><seg>三</seg></tuv></tu>"#));
    }

    #[test]
    fn test_tmx_single_variant_is_skipped() {
        let result = apply_replacements(
            TMX,
            FormatType::Tmx,
            &[ReplacementEntry::for_unit("2", "二")],
        );
        assert_eq!(result.applied_count, 0);
        assert_eq!(result.patched_text, TMX);
    }

    #[test]
    fn test_self_closing_unit_leaves_next_unit_alone() {
        let doc = r#"<xliff version="1.2"><file><body><trans-unit id="1"/><trans-unit id="2"><source>a</source><target>b</target></trans-unit></body></file></xliff>"#;
        let result = apply_replacements(doc, FormatType::Xliff, &[ReplacementEntry::for_unit("1", "X")]);
        assert_eq!(result.applied_count, 0);
        assert_eq!(result.patched_text, doc);

        let doc = r#"<tmx version="1.4"><body><tu tuid="1"/><tu tuid="2"><tuv xml:lang="en"><seg>a</seg></tuv><tuv xml:lang="de"><seg>b</seg></tuv></tu></body></tmx>"#;
        let result = apply_replacements(doc, FormatType::Tmx, &[ReplacementEntry::for_unit("1", "X")]);
        assert_eq!(result.applied_count, 0);
        assert_eq!(result.patched_text, doc);
    }

    #[test]
    fn test_entity_encoded_id_is_addressable() {
        let doc = r#"<xliff version="1.2"><file><body><trans-unit id="a&amp;b"><source>x</source><target/></trans-unit></body></file></xliff>"#;
        let result = apply_replacements(doc, FormatType::Xliff, &[ReplacementEntry::for_unit("a&b", "y")]);
        assert_eq!(result.applied_count, 1);
        assert!(result.patched_text.contains("<target>y</target>"));
    }

    #[test]
    fn test_unrecognized_format_returns_input() {
        let result = apply_replacements(
            "plain",
            FormatType::Unrecognized,
            &[ReplacementEntry::for_unit("1", "x")],
        );
        assert_eq!(result.patched_text, "plain");
        assert_eq!(result.applied_count, 0);
    }

    #[test]
    fn test_auto_detection() {
        let result =
            apply_replacements_auto(TMX, &[ReplacementEntry::for_unit("1", "壹")]).unwrap();
        assert_eq!(result.applied_count, 1);

        let err = apply_replacements_auto("plain", &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(_)));
    }
}
