//! Read pipeline: turns a document into [`TranslationUnit`] records and
//! validates documents.
//!
//! The structural outline decides which units exist, their order and their
//! plain-text values. Tag-preserving values are cut straight out of the raw
//! document so inline markup comes back exactly as written.

use crate::{
    attributes::{match_percent, namespace_bindings},
    error::Error,
    escape::decode_entities,
    formats::{Dialect, FormatType},
    options::ExtractOptions,
    outline::{Field, Outline},
    placeholder::normalize_segment,
    types::{TranslationUnit, ValidationReport},
};

/// Extracts every non-header unit of `raw`, numbered `1..=N` in document order.
///
/// With `preserve_inline_tags`, `source` and `target` keep their inline
/// markup verbatim; otherwise only text content is returned. Either way the
/// five XML entities are decoded once and outer whitespace is trimmed.
///
/// # Errors
///
/// [`Error::InvalidDocument`] when the document cannot be parsed, and
/// [`Error::UnsupportedFormat`] for [`FormatType::Unrecognized`].
///
/// # Example
///
/// ```rust
/// use tmxliff::{FormatType, extract_units};
///
/// let doc = r#"<xliff version="1.2"><file source-language="en" target-language="de"><body>
///   <trans-unit id="greet"><source>Hi <g id="1">there</g></source><target/></trans-unit>
/// </body></file></xliff>"#;
///
/// let units = extract_units(doc, FormatType::Xliff, true).unwrap();
/// assert_eq!(units[0].seg_number, 1);
/// assert_eq!(units[0].unit_id, "greet");
/// assert_eq!(units[0].source, r#"Hi <g id="1">there</g>"#);
/// assert_eq!(units[0].target_lang, "de");
/// ```
pub fn extract_units(
    raw: &str,
    format: FormatType,
    preserve_inline_tags: bool,
) -> Result<Vec<TranslationUnit>, Error> {
    extract_units_with(
        raw,
        format,
        ExtractOptions::new().with_inline_tags(preserve_inline_tags),
    )
}

/// [`extract_units`] with explicit [`ExtractOptions`].
pub fn extract_units_with(
    raw: &str,
    format: FormatType,
    options: ExtractOptions,
) -> Result<Vec<TranslationUnit>, Error> {
    let dialect = Dialect::for_document(raw, format)
        .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;
    let outline = Outline::read(raw, dialect.layout()).inspect_err(|e| {
        tracing::warn!(%dialect, error = %e, "failed to parse document");
    })?;

    let handler = dialect.handler();
    let inherited = handler.document_languages(raw);
    let bindings = namespace_bindings(raw);

    let mut units = Vec::new();
    for outlined in outline.body_units() {
        let seg_number = units.len() + 1;
        let unit_id = match (&outlined.id, dialect) {
            (Some(id), _) => id.clone(),
            (None, Dialect::Tmx) => seg_number.to_string(),
            (None, _) => {
                tracing::debug!(offset = outlined.span.start, "skipping unit without id");
                continue;
            }
        };
        let unit_text = outlined.span.as_str(raw);

        let mut unit = TranslationUnit::new(seg_number, unit_id);
        if options.preserve_inline_tags {
            unit.source = preserved(
                handler.extract_source(unit_text),
                outlined.source.as_ref(),
                raw,
            );
            unit.target = preserved(
                handler.extract_target(unit_text),
                outlined.target.as_ref(),
                raw,
            );
        } else {
            unit.source = plain(outlined.source.as_ref());
            unit.target = plain(outlined.target.as_ref());
        }

        unit.match_percent = match_percent(outlined.span.open_tag(raw), &bindings);
        let languages = handler.unit_languages(unit_text, &inherited);
        unit.source_lang = languages.source;
        unit.target_lang = languages.target;

        if dialect == Dialect::Tmx {
            unit.context_id = outlined.context.as_ref().map(|c| c.trim().to_string());
            unit.creator = outlined.creator.clone();
            unit.changer = outlined.changer.clone();
            if options.attach_no_tag_text {
                unit.no_tag_source = Some(no_tag(outlined.source.as_ref(), raw));
                unit.no_tag_target = Some(no_tag(outlined.target.as_ref(), raw));
            }
        }

        units.push(unit);
    }

    tracing::debug!(%dialect, units = units.len(), "extracted units");
    Ok(units)
}

/// Checks that `raw` parses as the given format and counts its non-header units.
///
/// Never fails: a parser error becomes `valid == false` with the parser
/// message and a count of `0`.
///
/// ```rust
/// use tmxliff::{FormatType, validate};
///
/// let report = validate("<invalid>Not XLIFF</invalid>", FormatType::Xliff);
/// assert!(!report.valid);
/// assert!(report.message.starts_with("invalid XLIFF document:"));
/// ```
pub fn validate(raw: &str, format: FormatType) -> ValidationReport {
    let Some(dialect) = Dialect::for_document(raw, format) else {
        return ValidationReport {
            valid: false,
            message: Error::UnsupportedFormat(format.to_string()).to_string(),
            unit_count: 0,
        };
    };
    let name = dialect.format();
    match Outline::read(raw, dialect.layout()) {
        Ok(outline) => ValidationReport {
            valid: true,
            message: format!("{name} document is valid"),
            unit_count: outline.body_units().count(),
        },
        Err(e) => ValidationReport {
            valid: false,
            message: format!("invalid {name} document: {}", e.message()),
            unit_count: 0,
        },
    }
}

/// Tag-preserving value: the raw-text cut when it yields anything, else the
/// outline's copy of the same markup. A field the outline never saw stays empty.
fn preserved(direct: Option<String>, field: Option<&Field>, raw: &str) -> String {
    let Some(field) = field else {
        return String::new();
    };
    let direct = direct
        .map(|markup| decode_entities(&markup).trim().to_string())
        .filter(|value| !value.is_empty());
    direct.unwrap_or_else(|| decode_entities(field.raw(raw)).trim().to_string())
}

fn plain(field: Option<&Field>) -> String {
    field.map(|f| f.text.trim().to_string()).unwrap_or_default()
}

fn no_tag(field: Option<&Field>, raw: &str) -> String {
    field
        .map(|f| normalize_segment(f.raw(raw)).trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2" xmlns:mq="MQXliff">
  <file source-language="EN" target-language="zh-CN" datatype="plaintext">
    <body>
      <trans-unit id="h" restype="x-gettext-domain-header"><source>header</source></trans-unit>
      <trans-unit id="1" mq:percent="85">
        <source> Save &amp; exit </source>
        <target>保存并退出</target>
      </trans-unit>
      <trans-unit><source>no id</source></trans-unit>
      <trans-unit id="2" target-language="ja">
        <source>Click <g id="1">here</g></source>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

    #[test]
    fn test_extract_plain() {
        let units = extract_units(XLIFF, FormatType::Xliff, false).unwrap();
        assert_eq!(units.len(), 2);

        assert_eq!(units[0].seg_number, 1);
        assert_eq!(units[0].unit_id, "1");
        assert_eq!(units[0].source, "Save & exit");
        assert_eq!(units[0].target, "保存并退出");
        assert_eq!(units[0].match_percent, 85.0);
        assert_eq!(units[0].source_lang, "en");
        assert_eq!(units[0].target_lang, "zh-cn");
        assert_eq!(units[0].no_tag_source, None);

        assert_eq!(units[1].seg_number, 2);
        assert_eq!(units[1].source, "Click here");
        assert_eq!(units[1].target, "");
        assert_eq!(units[1].match_percent, -1.0);
        assert_eq!(units[1].target_lang, "ja");
    }

    #[test]
    fn test_extract_preserving_tags() {
        let units = extract_units(XLIFF, FormatType::Xliff, true).unwrap();
        assert_eq!(units[0].source, "Save & exit");
        assert_eq!(units[1].source, r#"Click <g id="1">here</g>"#);
    }

    #[test]
    fn test_extract_tmx() {
        let doc = r#"<tmx version="1.4"><header srclang="en"/><body>
  <tu tuid="a" creationid="alice" changeid="bob">
    <prop type="x-context">menu</prop>
    <tuv xml:lang="en"><seg>Line<ph>&lt;mq:rxt displaytext="\n" val="\n" /&gt;</ph>two</seg></tuv>
    <tuv xml:lang="zh"><seg>行</seg></tuv>
  </tu>
  <tu><tuv lang="en"><seg>solo</seg></tuv></tu>
</body></tmx>"#;
        let units = extract_units(doc, FormatType::Tmx, false).unwrap();
        assert_eq!(units.len(), 2);

        let first = &units[0];
        assert_eq!(first.unit_id, "a");
        assert_eq!(first.context_id.as_deref(), Some("menu"));
        assert_eq!(first.creator.as_deref(), Some("alice"));
        assert_eq!(first.changer.as_deref(), Some("bob"));
        assert_eq!(first.no_tag_source.as_deref(), Some("Line\ntwo"));
        assert_eq!(first.no_tag_target.as_deref(), Some("行"));
        assert_eq!(first.source_lang, "en");
        assert_eq!(first.target_lang, "zh");

        let second = &units[1];
        assert_eq!(second.unit_id, "2");
        assert_eq!(second.source, "solo");
        assert_eq!(second.target, "");
        assert_eq!(second.source_lang, "");
        assert_eq!(second.creator, None);
    }

    #[test]
    fn test_no_tag_text_can_be_disabled() {
        let doc = r#"<tmx><body><tu tuid="1"><tuv xml:lang="en"><seg>a</seg></tuv><tuv xml:lang="de"><seg>b</seg></tuv></tu></body></tmx>"#;
        let units = extract_units_with(
            doc,
            FormatType::Tmx,
            ExtractOptions::new().with_no_tag_text(false),
        )
        .unwrap();
        assert_eq!(units[0].no_tag_source, None);
    }

    #[test]
    fn test_extract_invalid_document() {
        let err = extract_units("<xliff><file>", FormatType::Xliff, false).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_extract_unrecognized() {
        let err = extract_units("<xliff/>", FormatType::Unrecognized, false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validate() {
        let report = validate(XLIFF, FormatType::Xliff);
        assert!(report.valid);
        assert_eq!(report.message, "XLIFF document is valid");
        assert_eq!(report.unit_count, 3);

        let report = validate("<tmx><body></body></tmx>", FormatType::Tmx);
        assert!(report.valid);
        assert_eq!(report.message, "TMX document is valid");
        assert_eq!(report.unit_count, 0);
    }

    #[test]
    fn test_validate_invalid() {
        let report = validate("<?xml version=\"1.0\"?><invalid>Not XLIFF</invalid>", FormatType::Xliff);
        assert!(!report.valid);
        assert!(report.message.starts_with("invalid XLIFF document: "));
        assert_eq!(report.unit_count, 0);

        let report = validate("anything", FormatType::Unrecognized);
        assert!(!report.valid);
        assert_eq!(report.unit_count, 0);
    }
}
