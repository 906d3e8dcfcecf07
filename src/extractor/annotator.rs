// file: src/extractor/annotator.rs
// description: annotation service abstraction used by the pipeline handler
// reference: swappable backend trait for key phrase and entity detection

use crate::error::Result;
use crate::models::{DetectedEntity, KeyPhrase};
use async_trait::async_trait;

/// Key phrase and named entity detection over a single page of text.
///
/// Scores are reported on the 0-100 scale. Implementations must be
/// `Send + Sync` so one instance can serve every invocation of the process.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn detect_key_phrases(&self, text: &str, language_code: &str) -> Result<Vec<KeyPhrase>>;

    async fn detect_entities(&self, text: &str, language_code: &str)
    -> Result<Vec<DetectedEntity>>;
}
