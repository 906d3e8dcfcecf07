// file: src/pipeline/stats.rs
// description: per-invocation counters for pages and annotation filtering
// reference: tracks processing metrics for the final invocation summary

use crate::extractor::FilterOutcome;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvocationStats {
    pub bytes_downloaded: u64,
    pub pages_processed: usize,
    pub pages_annotated: usize,
    pub pages_truncated: usize,
    pub key_phrases_kept: usize,
    pub key_phrases_discarded: usize,
    pub entities_kept: usize,
    pub entities_discarded: usize,
    pub entities_overwritten: usize,
    pub duration_ms: u64,
}

impl InvocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_key_phrases(&mut self, outcome: FilterOutcome) {
        self.key_phrases_kept += outcome.kept;
        self.key_phrases_discarded += outcome.discarded;
    }

    pub fn record_entities(&mut self, outcome: FilterOutcome) {
        self.entities_kept += outcome.kept;
        self.entities_discarded += outcome.discarded;
        self.entities_overwritten += outcome.overwritten;
    }

    pub fn key_phrase_acceptance_rate(&self) -> f64 {
        let total = self.key_phrases_kept + self.key_phrases_discarded;
        if total == 0 {
            return 0.0;
        }
        (self.key_phrases_kept as f64 / total as f64) * 100.0
    }

    pub fn log_summary(&self) {
        info!("=== Invocation Summary ===");
        info!("Downloaded: {} bytes", self.bytes_downloaded);
        info!(
            "Pages: {} processed, {} annotated, {} truncated",
            self.pages_processed, self.pages_annotated, self.pages_truncated
        );
        info!(
            "Key phrases: {} kept, {} below threshold ({:.1}% accepted)",
            self.key_phrases_kept,
            self.key_phrases_discarded,
            self.key_phrase_acceptance_rate()
        );
        info!(
            "Entities: {} kept, {} below threshold, {} replaced by type",
            self.entities_kept, self.entities_discarded, self.entities_overwritten
        );
        info!("Duration: {} ms", self.duration_ms);
        info!("==========================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_filter_outcomes() {
        let mut stats = InvocationStats::new();
        stats.record_key_phrases(FilterOutcome {
            kept: 3,
            discarded: 1,
            overwritten: 0,
        });
        stats.record_entities(FilterOutcome {
            kept: 2,
            discarded: 4,
            overwritten: 1,
        });

        assert_eq!(stats.key_phrases_kept, 3);
        assert_eq!(stats.entities_discarded, 4);
        assert_eq!(stats.entities_overwritten, 1);
        assert_eq!(stats.key_phrase_acceptance_rate(), 75.0);
    }

    #[test]
    fn test_acceptance_rate_without_phrases() {
        assert_eq!(InvocationStats::new().key_phrase_acceptance_rate(), 0.0);
    }
}
