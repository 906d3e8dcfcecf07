// file: src/pipeline/handler.rs
// description: orchestrates download, pdf extraction, annotation and indexing for one trigger event
// reference: linear extract-annotate-index pipeline over injected service handles

use crate::config::Config;
use crate::error::Result;
use crate::extractor::{Annotator, ScoreFilter};
use crate::models::{SearchDocument, TriggerEvent, console_link};
use crate::parser::{PageTextNormalizer, PdfDocument, PdfExtractor};
use crate::pipeline::stats::InvocationStats;
use crate::search::{IndexReceipt, SearchIndex};
use crate::storage::ObjectStore;
use crate::utils::OperationTimer;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Confirmation returned to the runtime after a successful invocation.
const SUCCESS_MESSAGE: &str = "keyphrases Successfully Uploaded";

const SLOW_INVOCATION: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub language_code: String,
    pub min_score: f64,
    pub max_page_bytes: usize,
    pub annotate_empty_pages: bool,
    pub console_region: String,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            language_code: config.annotation.language_code.clone(),
            min_score: config.annotation.min_score,
            max_page_bytes: config.pipeline.max_page_bytes,
            annotate_empty_pages: config.pipeline.annotate_empty_pages,
            console_region: config.pipeline.console_region.clone(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&Config::default_config())
    }
}

#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    pub event: TriggerEvent,
    pub document: SearchDocument,
    pub receipt: IndexReceipt,
    pub stats: InvocationStats,
    pub indexed_at: DateTime<Utc>,
}

impl HandlerOutcome {
    pub fn message(&self) -> &'static str {
        SUCCESS_MESSAGE
    }
}

struct Annotations {
    page_text: Vec<String>,
    key_phrases: Vec<String>,
    entities: BTreeMap<String, String>,
}

pub struct PipelineHandler {
    store: Arc<dyn ObjectStore>,
    annotator: Arc<dyn Annotator>,
    index: Arc<dyn SearchIndex>,
    settings: PipelineSettings,
    extractor: PdfExtractor,
    normalizer: PageTextNormalizer,
    filter: ScoreFilter,
}

impl PipelineHandler {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        annotator: Arc<dyn Annotator>,
        index: Arc<dyn SearchIndex>,
        settings: PipelineSettings,
    ) -> Self {
        let normalizer = PageTextNormalizer::new(settings.max_page_bytes);
        let filter = ScoreFilter::new(settings.min_score);

        Self {
            store,
            annotator,
            index,
            settings,
            extractor: PdfExtractor::new(),
            normalizer,
            filter,
        }
    }

    /// Processes one trigger event into exactly one indexed document. Any
    /// failure is logged and returned; nothing is persisted for a failed run.
    pub async fn handle(&self, payload: &Value) -> Result<HandlerOutcome> {
        debug!(
            "Received event: {}",
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        );

        let result = self.process(payload).await;
        if let Err(err) = &result {
            error!(kind = err.kind(), error = %err, "Invocation failed");
        }
        result
    }

    async fn process(&self, payload: &Value) -> Result<HandlerOutcome> {
        let mut timer = OperationTimer::new("invocation");
        let mut stats = InvocationStats::new();

        let event = TriggerEvent::from_value(payload)?;
        info!(bucket = %event.bucket, key = %event.key, "Processing object");

        let annotations = {
            let object = self.store.download(&event.bucket, &event.key).await?;
            stats.bytes_downloaded = object.len();
            timer.checkpoint("download");

            let pdf = self.extractor.open(object.path())?;
            info!("Number of pages: {}", pdf.page_count());

            self.annotate_pages(&pdf, &mut stats).await?
            // the local copy is released here
        };
        timer.checkpoint("annotate");

        let document = SearchDocument::new(
            console_link(&event.bucket, &event.key, &self.settings.console_region),
            annotations.key_phrases,
            annotations.entities,
            annotations.page_text,
        );
        debug!(
            "Search document: {}",
            serde_json::to_string(&document).unwrap_or_default()
        );

        let receipt = self.index.index_document(&document).await?;
        timer.checkpoint("index");

        timer.warn_if_slow(SLOW_INVOCATION);
        stats.duration_ms = timer.finish().as_millis() as u64;
        stats.log_summary();

        Ok(HandlerOutcome {
            event,
            document,
            receipt,
            stats,
            indexed_at: Utc::now(),
        })
    }

    async fn annotate_pages(
        &self,
        pdf: &PdfDocument,
        stats: &mut InvocationStats,
    ) -> Result<Annotations> {
        let page_count = pdf.page_count();
        let mut annotations = Annotations {
            page_text: Vec::with_capacity(page_count),
            key_phrases: Vec::new(),
            entities: BTreeMap::new(),
        };
        let language = self.settings.language_code.as_str();

        for index in 0..page_count {
            let raw = pdf.page_text(index)?;
            if self.normalizer.is_truncated(&raw) {
                stats.pages_truncated += 1;
            }
            let text = self.normalizer.normalize(&raw);
            debug!(page = index + 1, raw_bytes = raw.len(), bytes = text.len(), "Extracted page text");
            stats.pages_processed += 1;

            if text.is_empty() && !self.settings.annotate_empty_pages {
                warn!(page = index + 1, "Page has no text, skipping annotation");
                annotations.page_text.push(text);
                continue;
            }

            let phrases = self.annotator.detect_key_phrases(&text, language).await?;
            stats.record_key_phrases(
                self.filter
                    .collect_key_phrases(&phrases, &mut annotations.key_phrases),
            );

            let entities = self.annotator.detect_entities(&text, language).await?;
            stats.record_entities(
                self.filter
                    .merge_entities(&entities, &mut annotations.entities),
            );

            stats.pages_annotated += 1;
            annotations.page_text.push(text);
        }

        Ok(annotations)
    }
}
