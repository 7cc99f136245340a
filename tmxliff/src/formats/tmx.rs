//! TMX (`<tu>` / `<tuv>` / `<seg>`) unit handling.
//!
//! A `<tu>` is addressed by `tuid` or `id`. The first `<tuv>` holds the
//! source segment and the second the target; units with fewer than two
//! variants have no target to patch.

use lazy_static::lazy_static;

use crate::{
    attributes::{Attributes, language},
    locate::{ElementFinder, ElementSpan, UnitSpan, locate_unit},
    traits::UnitHandler,
    types::LanguagePair,
};

const UNIT_ELEMENTS: &[&str] = &["tu"];
const ID_ATTRIBUTES: &[&str] = &["id", "tuid"];
const LANG_ATTRIBUTES: &[&str] = &["xml:lang", "lang"];

lazy_static! {
    static ref TUV: ElementFinder = ElementFinder::new("tuv");
    static ref SEG: ElementFinder = ElementFinder::new("seg");
}

/// TMX unit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tmx;

pub(crate) static TMX: Tmx = Tmx;

impl Tmx {
    /// The first `<seg>` of variant `index`, relative to `unit`.
    fn variant_seg(unit: &str, index: usize) -> Option<ElementSpan> {
        let tuv = TUV.find_all(unit).into_iter().nth(index)?;
        SEG.find(tuv.inner(unit))
            .map(|seg| seg.offset(tuv.content_start))
    }
}

impl UnitHandler for Tmx {
    fn locate_unit(&self, text: &str, key: &str) -> Option<UnitSpan> {
        locate_unit(text, UNIT_ELEMENTS, ID_ATTRIBUTES, key)
    }

    fn extract_source(&self, unit: &str) -> Option<String> {
        Tmx::variant_seg(unit, 0).map(|seg| seg.inner(unit).to_string())
    }

    fn extract_target(&self, unit: &str) -> Option<String> {
        Tmx::variant_seg(unit, 1).map(|seg| seg.inner(unit).to_string())
    }

    fn substitute_target(&self, unit: &str, replacement: &str) -> Option<String> {
        let seg = Tmx::variant_seg(unit, 1)?;
        let open = if seg.self_closing {
            let tag = seg.open_tag(unit);
            format!("{}>", tag.trim_end_matches("/>").trim_end())
        } else {
            seg.open_tag(unit).to_string()
        };
        let close = if seg.self_closing {
            "</seg>"
        } else {
            &unit[seg.content_end..seg.end]
        };

        let mut out = String::with_capacity(unit.len() + replacement.len());
        out.push_str(&unit[..seg.start]);
        out.push_str(&open);
        out.push_str(replacement);
        out.push_str(close);
        out.push_str(&unit[seg.end..]);
        Some(out)
    }

    fn unit_languages(&self, unit: &str, inherited: &LanguagePair) -> LanguagePair {
        let tuvs = TUV.find_all(unit);
        if tuvs.len() < 2 {
            return inherited.clone();
        }
        let lang = |tuv: &ElementSpan| {
            language(&Attributes::parse(tuv.open_tag(unit)), LANG_ATTRIBUTES)
        };
        LanguagePair::new(lang(&tuvs[0]), lang(&tuvs[1])).or(inherited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: &str = r#"<tu tuid="42" creationid="alice">
      <tuv xml:lang="EN-US"><seg>Open file</seg></tuv>
      <tuv lang="zh-CN"><seg>旧</seg></tuv>
    </tu>"#;

    #[test]
    fn test_extract_source_and_target() {
        assert_eq!(TMX.extract_source(UNIT).as_deref(), Some("Open file"));
        assert_eq!(TMX.extract_target(UNIT).as_deref(), Some("旧"));
    }

    #[test]
    fn test_single_variant_has_no_target() {
        let unit = r#"<tu tuid="1"><tuv xml:lang="en"><seg>Only</seg></tuv></tu>"#;
        assert_eq!(TMX.extract_source(unit).as_deref(), Some("Only"));
        assert!(TMX.extract_target(unit).is_none());
        assert!(TMX.substitute_target(unit, "x").is_none());
    }

    #[test]
    fn test_substitute_second_variant_only() {
        let unit = r#"<tu tuid="1"><tuv xml:lang="en"><seg>same</seg></tuv><tuv xml:lang="de"><seg>same</seg></tuv></tu>"#;
        let out = TMX.substitute_target(unit, "neu").unwrap();
        assert_eq!(
            out,
            r#"<tu tuid="1"><tuv xml:lang="en"><seg>same</seg></tuv><tuv xml:lang="de"><seg>neu</seg></tuv></tu>"#
        );
    }

    #[test]
    fn test_substitute_self_closing_seg() {
        let unit = r#"<tu tuid="1"><tuv xml:lang="en"><seg>a</seg></tuv><tuv xml:lang="de"><seg/></tuv></tu>"#;
        let out = TMX.substitute_target(unit, "b").unwrap();
        assert!(out.ends_with(r#"<tuv xml:lang="de"><seg>b</seg></tuv></tu>"#));
    }

    #[test]
    fn test_substitute_without_seg_is_skipped() {
        let unit = r#"<tu tuid="1"><tuv xml:lang="en"><seg>a</seg></tuv><tuv xml:lang="de"></tuv></tu>"#;
        assert!(TMX.substitute_target(unit, "b").is_none());
    }

    #[test]
    fn test_unit_languages() {
        assert_eq!(
            TMX.unit_languages(UNIT, &LanguagePair::default()),
            LanguagePair::new("en-us", "zh-cn")
        );
        let single = r#"<tu><tuv xml:lang="en"><seg>a</seg></tuv></tu>"#;
        assert_eq!(
            TMX.unit_languages(single, &LanguagePair::default()),
            LanguagePair::default()
        );
    }

    #[test]
    fn test_locate_by_tuid_or_id() {
        let doc = r#"<body><tu id="a"><tuv><seg>1</seg></tuv></tu><tu tuid="b"><tuv><seg>2</seg></tuv></tu></body>"#;
        assert!(TMX.locate_unit(doc, "a").is_some());
        let span = TMX.locate_unit(doc, "b").unwrap();
        assert_eq!(TMX.extract_source(span.as_str(doc)).as_deref(), Some("2"));
        assert!(TMX.locate_unit(doc, "c").is_none());
    }
}
