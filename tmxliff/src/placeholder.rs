//! Cleanup of vendor placeholder markup inside TMX segments.
//!
//! CAT tools that export TMX (memoQ in particular) wrap their own inline tags
//! in `<ph>`, `<bpt>` and `<ept>` elements whose text is an escaped `mq:`
//! element. [`normalize_segment`] turns that markup into plain text with
//! ordinary inline tags.
//!
//! The passes run in a fixed order. Later patterns match literal `&lt;...&gt;`
//! sequences that only exist after the first pass, and the final entity decode
//! must not happen before the placeholder patterns have run.

use lazy_static::lazy_static;
use regex::Regex;

use crate::escape::decode_entities;

lazy_static! {
    /// `<ph>&lt;mq:rxt ... val="\n" /&gt;</ph>`: a literal line break.
    static ref NEWLINE_PH_REGEX: Regex =
        Regex::new(r#"<ph>&lt;mq:rxt[^>]*val="(?:\\n|\n)"[^>]*/&gt;</ph>"#).unwrap();
    /// `<ph>&lt;mq:ch val=" " /&gt;</ph>`: space suppression.
    static ref SPACE_PH_REGEX: Regex =
        Regex::new(r#"<ph>&lt;mq:ch val="\s*"\s*/&gt;</ph>"#).unwrap();
    static ref SPACE_DIRECT_REGEX: Regex = Regex::new(r#"<mq:ch val="\s*"\s*/>"#).unwrap();
    /// `<bpt>` / `<ept>` pair wrapping an escaped `mq:rxt` open and close.
    static ref PAIRED_PH_REGEX: Regex = Regex::new(concat!(
        r#"<bpt[^>]*>&lt;mq:rxt[^>]*val="&lt;([^&]*)&gt;"[^>]*&gt;</bpt>"#,
        r#"(.*?)"#,
        r#"<ept[^>]*>&lt;/mq:rxt[^>]*val="&lt;/([^&]*)&gt;"[^>]*&gt;</ept>"#,
    ))
    .unwrap();
    /// Unwrapped `mq:rxt` open/close elements.
    static ref PAIRED_DIRECT_REGEX: Regex = Regex::new(concat!(
        r#"<mq:rxt[^>]*val="&lt;([^&]*)&gt;"[^>]*>"#,
        r#"(.*?)"#,
        r#"</mq:rxt[^>]*val="&lt;/([^&]*)&gt;"[^>]*>"#,
    ))
    .unwrap();
    static ref LEFTOVER_TAG_REGEX: Regex =
        Regex::new(r"</?(?:bpt|ept|ph|it|mq:[a-z\-]+)[^>]*>").unwrap();
}

/// Normalizes raw TMX `<seg>` inner markup into tag-free text.
///
/// Steps, in order:
/// 1. undo one extra layer of escaping (`&amp;lt;` to `&lt;`, `&amp;` to `&`, `&quot;` to `"`)
/// 2. newline placeholder to `\n`
/// 3. space-suppression placeholder removed
/// 4. begin/end placeholder pairs to `<open>inner</close>`, paired positionally
/// 5. any other `bpt`/`ept`/`ph`/`it`/`mq:*` element removed
/// 6. one pass of XML entity decoding
pub fn normalize_segment(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let cleaned = input
        .replace("&amp;lt;", "&lt;")
        .replace("&amp;gt;", "&gt;")
        .replace("&amp;", "&")
        .replace("&quot;", "\"");

    let cleaned = NEWLINE_PH_REGEX.replace_all(&cleaned, "\n");
    let cleaned = SPACE_PH_REGEX.replace_all(&cleaned, "");
    let cleaned = SPACE_DIRECT_REGEX.replace_all(&cleaned, "");

    let cleaned = PAIRED_PH_REGEX.replace_all(&cleaned, "<${1}>${2}</${3}>");
    let cleaned = PAIRED_DIRECT_REGEX.replace_all(&cleaned, "<${1}>${2}</${3}>");

    let cleaned = LEFTOVER_TAG_REGEX.replace_all(&cleaned, "");

    decode_entities(&cleaned).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_placeholder() {
        let s = r#"Hello <ph>&lt;mq:rxt displaytext="\n" val="\n" /&gt;</ph>World"#;
        assert_eq!(normalize_segment(s), "Hello \nWorld");
    }

    #[test]
    fn test_newline_placeholder_with_escaped_quotes() {
        let s = r#"A<ph>&lt;mq:rxt displaytext=&quot;\n&quot; val=&quot;\n&quot; /&gt;</ph>B"#;
        assert_eq!(normalize_segment(s), "A\nB");
    }

    #[test]
    fn test_space_placeholder_removed() {
        assert_eq!(
            normalize_segment(r#"no<ph>&lt;mq:ch val=" " /&gt;</ph>space"#),
            "nospace"
        );
        assert_eq!(normalize_segment(r#"no<mq:ch val=" " />space"#), "nospace");
    }

    #[test]
    fn test_paired_placeholder_becomes_inline_tags() {
        let s = r#"<bpt>&lt;mq:rxt val="&lt;font color=red&gt;"&gt;</bpt>Red Text<ept>&lt;/mq:rxt val="&lt;/font&gt;"&gt;</ept>"#;
        assert_eq!(normalize_segment(s), "<font color=red>Red Text</font>");
    }

    #[test]
    fn test_pairs_are_positional() {
        let s = concat!(
            r#"<bpt i="1">&lt;mq:rxt val="&lt;b&gt;"&gt;</bpt>one<ept i="1">&lt;/mq:rxt val="&lt;/b&gt;"&gt;</ept>"#,
            " and ",
            r#"<bpt i="2">&lt;mq:rxt val="&lt;i&gt;"&gt;</bpt>two<ept i="2">&lt;/mq:rxt val="&lt;/i&gt;"&gt;</ept>"#,
        );
        assert_eq!(normalize_segment(s), "<b>one</b> and <i>two</i>");
    }

    #[test]
    fn test_direct_rxt_pair() {
        let s = r#"<mq:rxt val="&lt;u&gt;">under</mq:rxt val="&lt;/u&gt;">"#;
        assert_eq!(normalize_segment(s), "<u>under</u>");
    }

    #[test]
    fn test_leftover_placeholders_stripped() {
        let s = r#"Press <ph x="1">{1}</ph>OK<it pos="end">&lt;/b&gt;</it> now"#;
        assert_eq!(normalize_segment(s), "Press {1}OK</b> now");
    }

    #[test]
    fn test_double_escaped_entities() {
        assert_eq!(normalize_segment("a &amp;lt;tag&amp;gt; b"), "a <tag> b");
        assert_eq!(normalize_segment("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_segment(""), "");
    }
}
