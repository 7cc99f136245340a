//! Options for unit extraction.

/// Extraction behavior for [`crate::extract_units_with`] and [`crate::Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Return source/target inner markup verbatim instead of text content only.
    pub preserve_inline_tags: bool,
    /// Whether TMX units carry `no_tag_source` / `no_tag_target`.
    pub attach_no_tag_text: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            preserve_inline_tags: false,
            attach_no_tag_text: true,
        }
    }
}

impl ExtractOptions {
    /// Creates default extract options: plain text, no-tag text attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables tag-preserving extraction.
    pub fn with_inline_tags(mut self, preserve_inline_tags: bool) -> Self {
        self.preserve_inline_tags = preserve_inline_tags;
        self
    }

    /// Enables/disables no-tag text on TMX units.
    pub fn with_no_tag_text(mut self, attach_no_tag_text: bool) -> Self {
        self.attach_no_tag_text = attach_no_tag_text;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ExtractOptions::new();
        assert!(!options.preserve_inline_tags);
        assert!(options.attach_no_tag_text);

        let options = options.with_inline_tags(true).with_no_tag_text(false);
        assert!(options.preserve_inline_tags);
        assert!(!options.attach_no_tag_text);
    }
}
