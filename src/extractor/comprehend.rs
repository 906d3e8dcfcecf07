// file: src/extractor/comprehend.rs
// description: Amazon Comprehend backed annotator for key phrases and entities
// reference: https://docs.aws.amazon.com/comprehend/latest/APIReference/API_DetectKeyPhrases.html

use crate::error::{PipelineError, Result};
use crate::extractor::annotator::Annotator;
use crate::models::{DetectedEntity, KeyPhrase};
use async_trait::async_trait;
use aws_sdk_comprehend::Client;
use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::LanguageCode;
use tracing::debug;

pub struct ComprehendAnnotator {
    client: Client,
}

impl ComprehendAnnotator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Comprehend reports confidence in 0..=1. The multiplication stays in f32
/// so values such as 0.9 land exactly on 90.0.
pub(crate) fn to_percent(score: Option<f32>) -> f64 {
    f64::from(score.unwrap_or(0.0) * 100.0)
}

#[async_trait]
impl Annotator for ComprehendAnnotator {
    async fn detect_key_phrases(&self, text: &str, language_code: &str) -> Result<Vec<KeyPhrase>> {
        debug!("Requesting key phrases for {} bytes", text.len());

        let output = self
            .client
            .detect_key_phrases()
            .text(text)
            .language_code(LanguageCode::from(language_code))
            .send()
            .await
            .map_err(|e| {
                PipelineError::annotation(format!(
                    "DetectKeyPhrases failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let phrases: Vec<KeyPhrase> = output
            .key_phrases()
            .iter()
            .map(|phrase| {
                KeyPhrase::new(phrase.text().unwrap_or_default(), to_percent(phrase.score()))
            })
            .collect();

        debug!("Comprehend returned {} key phrases", phrases.len());
        Ok(phrases)
    }

    async fn detect_entities(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<DetectedEntity>> {
        debug!("Requesting entities for {} bytes", text.len());

        let output = self
            .client
            .detect_entities()
            .text(text)
            .language_code(LanguageCode::from(language_code))
            .send()
            .await
            .map_err(|e| {
                PipelineError::annotation(format!(
                    "DetectEntities failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let entities: Vec<DetectedEntity> = output
            .entities()
            .iter()
            .map(|entity| {
                DetectedEntity::new(
                    entity.r#type().map(|t| t.as_str()).unwrap_or_default(),
                    entity.text().unwrap_or_default(),
                    to_percent(entity.score()),
                )
            })
            .collect();

        debug!("Comprehend returned {} entities", entities.len());
        Ok(entities)
    }
}
