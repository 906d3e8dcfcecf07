// file: src/models/document.rs
// description: aggregated search document written once per processed object
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CONSOLE_OBJECT_URL: &str = "https://s3.console.aws.amazon.com/s3/object";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    #[serde(rename = "s3link")]
    pub source_link: String,
    #[serde(rename = "KeyPhrases")]
    pub key_phrases: Vec<String>,
    #[serde(rename = "Entity")]
    pub entities: BTreeMap<String, String>,
    #[serde(rename = "text")]
    pub page_text: Vec<String>,
}

impl SearchDocument {
    pub fn new(
        source_link: String,
        key_phrases: Vec<String>,
        entities: BTreeMap<String, String>,
        page_text: Vec<String>,
    ) -> Self {
        Self {
            source_link,
            key_phrases,
            entities,
            page_text,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_text.len()
    }
}

/// Console link for an object. The key is inserted as-is, already decoded.
pub fn console_link(bucket: &str, key: &str, region: &str) -> String {
    format!("{}/{}/{}?region={}", CONSOLE_OBJECT_URL, bucket, key, region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_console_link() {
        assert_eq!(
            console_link("resumes", "2024/jane.pdf", "us-east-1"),
            "https://s3.console.aws.amazon.com/s3/object/resumes/2024/jane.pdf?region=us-east-1"
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let mut entities = BTreeMap::new();
        entities.insert("ORGANIZATION".to_string(), "Amazon".to_string());

        let doc = SearchDocument::new(
            console_link("b", "k.pdf", "us-east-1"),
            vec!["Java".to_string()],
            entities,
            vec!["page one".to_string()],
        );

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "s3link": "https://s3.console.aws.amazon.com/s3/object/b/k.pdf?region=us-east-1",
                "KeyPhrases": ["Java"],
                "Entity": { "ORGANIZATION": "Amazon" },
                "text": ["page one"]
            })
        );
        assert_eq!(doc.page_count(), 1);
    }
}
