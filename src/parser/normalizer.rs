// file: src/parser/normalizer.rs
// description: page text truncation and control-character stripping ahead of annotation
// reference: Comprehend synchronous API input size limits

use crate::models::strip_control;

/// Bounds a page's text to a byte budget, then strips tab, newline and
/// carriage-return characters from both ends. Truncation happens first, so
/// whitespace sitting at the cut point is removed as well.
pub struct PageTextNormalizer {
    max_bytes: usize,
}

impl PageTextNormalizer {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn normalize(&self, raw: &str) -> String {
        strip_control(self.truncate(raw)).to_string()
    }

    /// Longest prefix of at most `max_bytes` bytes ending on a char boundary.
    pub fn truncate<'a>(&self, raw: &'a str) -> &'a str {
        if raw.len() <= self.max_bytes {
            return raw;
        }

        let mut end = self.max_bytes;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        &raw[..end]
    }

    pub fn is_truncated(&self, raw: &str) -> bool {
        raw.len() > self.max_bytes
    }
}

impl Default for PageTextNormalizer {
    fn default() -> Self {
        Self::new(5000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_is_only_stripped() {
        let normalizer = PageTextNormalizer::default();
        assert_eq!(
            normalizer.normalize("\n\tSenior Rust Engineer\r\n"),
            "Senior Rust Engineer"
        );
    }

    #[test]
    fn test_long_text_is_bounded() {
        let normalizer = PageTextNormalizer::default();
        let raw = "a".repeat(7000);

        let text = normalizer.normalize(&raw);

        assert!(normalizer.is_truncated(&raw));
        assert_eq!(text.len(), 5000);
        assert!(raw.starts_with(&text));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let normalizer = PageTextNormalizer::new(5);
        // "é" is two bytes, so byte 5 falls inside the third one
        let text = normalizer.normalize("ééééé");
        assert_eq!(text, "éé");
        assert!(text.len() <= 5);
    }

    #[test]
    fn test_strip_happens_after_truncation() {
        let normalizer = PageTextNormalizer::new(8);
        assert_eq!(normalizer.normalize("skills\n\nremainder"), "skills");
    }

    #[test]
    fn test_truncation_is_deterministic() {
        let normalizer = PageTextNormalizer::new(100);
        let raw = "Experience with AWS, Java and Rust. ".repeat(20);
        assert_eq!(normalizer.normalize(&raw), normalizer.normalize(&raw));
    }

    #[test]
    fn test_empty_page_stays_empty() {
        let normalizer = PageTextNormalizer::default();
        assert_eq!(normalizer.normalize("\n\n"), "");
    }
}
