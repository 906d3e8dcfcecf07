// file: src/models/annotation.rs
// description: key phrase and named entity values returned by the annotation service
// reference: https://docs.aws.amazon.com/comprehend/latest/dg/how-entities.html

use serde::{Deserialize, Serialize};

/// Characters trimmed from both ends of page text and annotation values.
const STRIP_CHARS: [char; 3] = ['\t', '\n', '\r'];

pub fn strip_control(value: &str) -> &str {
    value.trim_matches(|c| STRIP_CHARS.contains(&c))
}

/// A key phrase with its confidence on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub text: String,
    pub score: f64,
}

impl KeyPhrase {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// A named entity with its confidence on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub entity_type: String,
    pub text: String,
    pub score: f64,
}

impl DetectedEntity {
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>, score: f64) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_control_keeps_spaces() {
        assert_eq!(strip_control("\t\r\n Rust \n"), " Rust ");
        assert_eq!(strip_control("\n\n"), "");
    }
}
