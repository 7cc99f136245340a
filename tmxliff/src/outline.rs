//! Structural pass over a document with the quick-xml event reader.
//!
//! The outline is read-only: it records where each unit and its source/target
//! content sit in the original text (byte offsets) plus the text-only value of
//! those fields. It is what decides whether a document is well-formed, which
//! units exist and in what order. Writes never go through it.

use std::ops::Range;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{error::Error, escape::decode_entities, locate::UnitSpan};

const GETTEXT_HEADER_RESTYPE: &str = "x-gettext-domain-header";

/// Which element layout the outline should expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<xliff>` root; units are `trans-unit` (1.2) or `unit` (2.0) with
    /// `<source>` / `<target>` descendants.
    Xliff,
    /// `<tmx>` root; units are `tu`, source and target are the `<seg>` of the
    /// first and second `<tuv>`.
    Tmx,
}

impl Layout {
    fn root(self) -> &'static str {
        match self {
            Layout::Xliff => "xliff",
            Layout::Tmx => "tmx",
        }
    }

    fn is_unit(self, name: &str) -> bool {
        match self {
            Layout::Xliff => name == "trans-unit" || name == "unit",
            Layout::Tmx => name == "tu",
        }
    }
}

/// Source or target content of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Byte range of the element's inner markup in the document.
    pub inner: Range<usize>,
    /// Text content only: inline elements dropped, their text kept, entities decoded.
    pub text: String,
}

impl Field {
    fn empty_at(pos: usize) -> Self {
        Field {
            inner: pos..pos,
            text: String::new(),
        }
    }

    /// The inner markup exactly as written in `document`.
    pub fn raw<'a>(&self, document: &'a str) -> &'a str {
        &document[self.inner.clone()]
    }
}

/// One unit as seen by the structural pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutline {
    /// `id` for XLIFF; `tuid`, then `id`, for TMX.
    pub id: Option<String>,
    pub span: UnitSpan,
    pub header: bool,
    pub source: Option<Field>,
    pub target: Option<Field>,
    /// TMX only: first `<prop type="x-context">` text.
    pub context: Option<String>,
    /// TMX only: `creationid` / `changeid`.
    pub creator: Option<String>,
    pub changer: Option<String>,
}

/// All units of a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub units: Vec<UnitOutline>,
}

impl Outline {
    /// Reads `text` and collects its units.
    ///
    /// Fails with [`Error::InvalidDocument`] when the text is not well-formed
    /// XML or its root element is not the one `layout` requires.
    pub fn read(text: &str, layout: Layout) -> Result<Self, Error> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<String> = Vec::new();
        let mut seen_root = false;
        let mut current: Option<UnitBuilder> = None;
        let mut units = Vec::new();

        loop {
            let before = reader.buffer_position() as usize;
            let event = reader
                .read_event()
                .map_err(|e| Error::invalid_document(format!("{e} (near byte {before})")))?;
            let after = reader.buffer_position() as usize;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let empty = matches!(event, Event::Empty(_));
                    let name = local_name(e);
                    if stack.is_empty() {
                        if seen_root {
                            return Err(Error::invalid_document(format!(
                                "unexpected element <{name}> after the root element"
                            )));
                        }
                        if name != layout.root() {
                            return Err(Error::invalid_document(format!(
                                "expected root element <{}>, found <{name}>",
                                layout.root()
                            )));
                        }
                        seen_root = true;
                    }
                    let attrs = attributes_of(e)?;

                    match current.as_mut() {
                        None if layout.is_unit(&name) => {
                            let unit = UnitBuilder::new(layout, &attrs, before, after, stack.len());
                            if empty {
                                units.push(unit.finish(after, after));
                            } else {
                                current = Some(unit);
                            }
                        }
                        Some(unit) => unit.open(&name, &attrs, after, stack.len(), empty),
                        None => {}
                    }

                    if !empty {
                        stack.push(name);
                    }
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
                    match stack.pop() {
                        Some(open) if open == name => {}
                        Some(open) => {
                            return Err(Error::invalid_document(format!(
                                "expected </{open}>, found </{name}> (near byte {before})"
                            )));
                        }
                        None => {
                            return Err(Error::invalid_document(format!(
                                "unmatched </{name}> (near byte {before})"
                            )));
                        }
                    }
                    if let Some(unit) = current.as_mut() {
                        if unit.depth == stack.len() && layout.is_unit(&name) {
                            if let Some(unit) = current.take() {
                                units.push(unit.finish(before, after));
                            }
                        } else {
                            unit.close(&name, before, stack.len());
                        }
                    }
                }
                Event::Text(_) => {
                    if let Some(unit) = current.as_mut() {
                        unit.text(&decode_entities(&text[before..after]));
                    }
                }
                Event::CData(_) => {
                    if let Some(unit) = current.as_mut() {
                        let raw = &text[before..after];
                        let inner = raw
                            .strip_prefix("<![CDATA[")
                            .and_then(|s| s.strip_suffix("]]>"))
                            .unwrap_or(raw);
                        unit.text(inner);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::invalid_document(format!(
                "unexpected end of document: <{open}> is not closed"
            )));
        }
        if !seen_root {
            return Err(Error::invalid_document(format!(
                "no <{}> root element found",
                layout.root()
            )));
        }

        Ok(Outline { units })
    }

    /// Units that take part in numbering.
    pub fn body_units(&self) -> impl Iterator<Item = &UnitOutline> {
        self.units.iter().filter(|u| !u.header)
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase()
}

/// Attributes with lower-cased qualified names and unescaped values.
fn attributes_of(e: &BytesStart) -> Result<Vec<(String, String)>, Error> {
    e.attributes()
        .map(|attr| {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_lowercase();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect()
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Source,
    Target,
    Context,
}

#[derive(Debug)]
struct Capture {
    slot: Slot,
    element: String,
    depth: usize,
    content_start: usize,
    text: String,
}

#[derive(Debug)]
struct UnitBuilder {
    layout: Layout,
    depth: usize,
    start: usize,
    content_start: usize,
    id: Option<String>,
    header: bool,
    creator: Option<String>,
    changer: Option<String>,
    source: Option<Field>,
    target: Option<Field>,
    context: Option<String>,
    capture: Option<Capture>,
    /// Depth of an enclosing `<alt-trans>`, whose source/target are not the unit's own.
    alt_trans_depth: Option<usize>,
    tuv_count: usize,
}

impl UnitBuilder {
    fn new(
        layout: Layout,
        attrs: &[(String, String)],
        start: usize,
        content_start: usize,
        depth: usize,
    ) -> Self {
        let non_empty = |name: &str| attr(attrs, name).filter(|v| !v.is_empty()).map(String::from);
        let (id, header, creator, changer) = match layout {
            Layout::Xliff => (
                non_empty("id"),
                attr(attrs, "restype") == Some(GETTEXT_HEADER_RESTYPE),
                None,
                None,
            ),
            Layout::Tmx => (
                non_empty("tuid").or_else(|| non_empty("id")),
                false,
                attr(attrs, "creationid").map(String::from),
                attr(attrs, "changeid").map(String::from),
            ),
        };
        UnitBuilder {
            layout,
            depth,
            start,
            content_start,
            id,
            header,
            creator,
            changer,
            source: None,
            target: None,
            context: None,
            capture: None,
            alt_trans_depth: None,
            tuv_count: 0,
        }
    }

    /// An element opened inside the unit; `depth` is its nesting level.
    fn open(&mut self, name: &str, attrs: &[(String, String)], after: usize, depth: usize, empty: bool) {
        if self.capture.is_some() {
            return;
        }
        let slot = match (self.layout, name) {
            (Layout::Xliff, "alt-trans") => {
                if !empty && self.alt_trans_depth.is_none() {
                    self.alt_trans_depth = Some(depth);
                }
                None
            }
            (Layout::Xliff, _) if self.alt_trans_depth.is_some() => None,
            (Layout::Xliff, "source") if self.source.is_none() => Some(Slot::Source),
            (Layout::Xliff, "target") if self.target.is_none() => Some(Slot::Target),
            (Layout::Tmx, "tuv") => {
                self.tuv_count += 1;
                None
            }
            (Layout::Tmx, "seg") if self.tuv_count == 1 && self.source.is_none() => Some(Slot::Source),
            (Layout::Tmx, "seg") if self.tuv_count == 2 && self.target.is_none() => Some(Slot::Target),
            (Layout::Tmx, "prop")
                if self.context.is_none() && attr(attrs, "type") == Some("x-context") =>
            {
                Some(Slot::Context)
            }
            _ => None,
        };

        let Some(slot) = slot else { return };
        if empty {
            match slot {
                Slot::Source => self.source = Some(Field::empty_at(after)),
                Slot::Target => self.target = Some(Field::empty_at(after)),
                Slot::Context => self.context = Some(String::new()),
            }
        } else {
            self.capture = Some(Capture {
                slot,
                element: name.to_string(),
                depth,
                content_start: after,
                text: String::new(),
            });
        }
    }

    /// An element closed inside the unit; `depth` is the level it was opened at.
    fn close(&mut self, name: &str, before: usize, depth: usize) {
        if self.alt_trans_depth == Some(depth) && name == "alt-trans" {
            self.alt_trans_depth = None;
            return;
        }
        let done = matches!(&self.capture, Some(c) if c.depth == depth && c.element == name);
        if !done {
            return;
        }
        if let Some(capture) = self.capture.take() {
            let field = Field {
                inner: capture.content_start..before,
                text: capture.text,
            };
            match capture.slot {
                Slot::Source => self.source = Some(field),
                Slot::Target => self.target = Some(field),
                Slot::Context => self.context = Some(field.text),
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
    }

    fn finish(self, content_end: usize, end: usize) -> UnitOutline {
        UnitOutline {
            id: self.id,
            span: UnitSpan {
                start: self.start,
                content_start: self.content_start,
                content_end,
                end,
            },
            header: self.header,
            source: self.source,
            target: self.target,
            context: self.context,
            creator: self.creator,
            changer: self.changer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file source-language="en" target-language="zh" datatype="plaintext">
    <body>
      <trans-unit id="1" percent="100">
        <source>Click <g id="1">here</g> &amp; go</source>
        <target>点击</target>
        <alt-trans><source>ignored</source><target>ignored</target></alt-trans>
      </trans-unit>
      <trans-unit id="2"><source/></trans-unit>
    </body>
  </file>
</xliff>"#;

    #[test]
    fn test_xliff_outline() {
        let outline = Outline::read(XLIFF, Layout::Xliff).unwrap();
        assert_eq!(outline.units.len(), 2);

        let first = &outline.units[0];
        assert_eq!(first.id.as_deref(), Some("1"));
        let source = first.source.as_ref().unwrap();
        assert_eq!(source.raw(XLIFF), r#"Click <g id="1">here</g> &amp; go"#);
        assert_eq!(source.text, "Click here & go");
        assert_eq!(first.target.as_ref().unwrap().text, "点击");
        assert!(first.span.as_str(XLIFF).starts_with(r#"<trans-unit id="1" percent="100">"#));
        assert!(first.span.as_str(XLIFF).ends_with("</trans-unit>"));

        let second = &outline.units[1];
        assert_eq!(second.source.as_ref().unwrap().text, "");
        assert!(second.target.is_none());
    }

    #[test]
    fn test_alt_trans_does_not_supply_target() {
        let doc = r#"<xliff><file><body><trans-unit id="1"><source>a</source><alt-trans><target>b</target></alt-trans></trans-unit></body></file></xliff>"#;
        let outline = Outline::read(doc, Layout::Xliff).unwrap();
        assert!(outline.units[0].target.is_none());
    }

    #[test]
    fn test_header_units_are_flagged() {
        let doc = r#"<xliff><file><body>
            <trans-unit id="h" restype="x-gettext-domain-header"><source>hdr</source></trans-unit>
            <trans-unit id="1"><source>a</source></trans-unit>
        </body></file></xliff>"#;
        let outline = Outline::read(doc, Layout::Xliff).unwrap();
        assert_eq!(outline.units.len(), 2);
        assert!(outline.units[0].header);
        assert_eq!(outline.body_units().count(), 1);
    }

    #[test]
    fn test_tmx_outline() {
        let doc = r#"<tmx version="1.4"><header/><body>
            <tu tuid="7" creationid="u1"><prop type="x-context">ctx</prop>
              <tuv xml:lang="en"><seg>Hi <ph>&lt;b&gt;</ph></seg></tuv>
              <tuv xml:lang="zh"><seg>你好</seg></tuv>
            </tu>
            <tu><tuv xml:lang="en"><seg>Only</seg></tuv></tu>
        </body></tmx>"#;
        let outline = Outline::read(doc, Layout::Tmx).unwrap();
        assert_eq!(outline.units.len(), 2);
        let tu = &outline.units[0];
        assert_eq!(tu.id.as_deref(), Some("7"));
        assert_eq!(tu.creator.as_deref(), Some("u1"));
        assert_eq!(tu.changer, None);
        assert_eq!(tu.context.as_deref(), Some("ctx"));
        assert_eq!(tu.source.as_ref().unwrap().raw(doc), "Hi <ph>&lt;b&gt;</ph>");
        assert_eq!(tu.source.as_ref().unwrap().text, "Hi <b>");
        assert_eq!(tu.target.as_ref().unwrap().text, "你好");

        let second = &outline.units[1];
        assert_eq!(second.id, None);
        assert!(second.target.is_none());
    }

    #[test]
    fn test_cdata_text() {
        let doc = r#"<xliff><trans-unit id="1"><source><![CDATA[a < b]]></source></trans-unit></xliff>"#;
        let outline = Outline::read(doc, Layout::Xliff).unwrap();
        assert_eq!(outline.units[0].source.as_ref().unwrap().text, "a < b");
    }

    #[test]
    fn test_wrong_root_is_invalid() {
        let err = Outline::read("<?xml version='1.0'?><invalid>Not XLIFF</invalid>", Layout::Xliff)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
        assert!(err.to_string().contains("<invalid>"));
    }

    #[test]
    fn test_malformed_documents_are_invalid() {
        for doc in [
            "",
            "just text",
            "<tmx><body><tu></body></tmx>",
            "<tmx><body>",
            "<tmx></tmx><tmx></tmx>",
            r#"<tmx><tu tuid="1" tuid="2"></tu></tmx>"#,
        ] {
            assert!(Outline::read(doc, Layout::Tmx).is_err(), "accepted: {doc:?}");
        }
    }
}
