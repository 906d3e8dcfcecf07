// file: src/extractor/filter.rs
// description: confidence filtering and aggregation of per-page annotations
// reference: internal aggregation rules for key phrases and entities

use crate::models::{DetectedEntity, KeyPhrase, strip_control};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: usize,
    pub discarded: usize,
    /// Entities that replaced a value already present for their type.
    pub overwritten: usize,
}

pub struct ScoreFilter {
    min_score: f64,
}

impl ScoreFilter {
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// Inclusive: a score equal to the threshold passes.
    pub fn accepts(&self, score: f64) -> bool {
        score >= self.min_score
    }

    /// Appends the stripped text of every accepted phrase, in order.
    /// Duplicates are kept.
    pub fn collect_key_phrases(
        &self,
        phrases: &[KeyPhrase],
        into: &mut Vec<String>,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for phrase in phrases {
            if self.accepts(phrase.score) {
                into.push(strip_control(&phrase.text).to_string());
                outcome.kept += 1;
            } else {
                outcome.discarded += 1;
            }
        }

        outcome
    }

    /// Writes every accepted entity into `into` keyed by its type. A later
    /// entity of the same type replaces the earlier one, including across pages.
    pub fn merge_entities(
        &self,
        entities: &[DetectedEntity],
        into: &mut BTreeMap<String, String>,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for entity in entities {
            if !self.accepts(entity.score) {
                outcome.discarded += 1;
                continue;
            }

            let entity_type = strip_control(&entity.entity_type).to_string();
            let text = strip_control(&entity.text).to_string();

            if let Some(previous) = into.insert(entity_type, text) {
                debug!(
                    entity_type = %entity.entity_type,
                    previous = %previous,
                    "Entity value replaced"
                );
                outcome.overwritten += 1;
            }
            outcome.kept += 1;
        }

        outcome
    }
}

impl Default for ScoreFilter {
    fn default() -> Self {
        Self::new(90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = ScoreFilter::default();
        let phrases = vec![
            KeyPhrase::new("exactly ninety", 90.0),
            KeyPhrase::new("just below", 89.999),
            KeyPhrase::new("confident", 99.5),
        ];

        let mut kept = Vec::new();
        let outcome = filter.collect_key_phrases(&phrases, &mut kept);

        assert_eq!(kept, vec!["exactly ninety", "confident"]);
        assert_eq!(outcome.kept, 2);
        assert_eq!(outcome.discarded, 1);
    }

    #[test]
    fn test_key_phrases_keep_order_and_duplicates() {
        let filter = ScoreFilter::default();
        let mut kept = vec!["Java".to_string()];

        filter.collect_key_phrases(
            &[KeyPhrase::new("\tAWS\n", 95.0), KeyPhrase::new("Java", 92.0)],
            &mut kept,
        );

        assert_eq!(kept, vec!["Java", "AWS", "Java"]);
    }

    #[test]
    fn test_entities_last_write_wins() {
        let filter = ScoreFilter::default();
        let mut entities = BTreeMap::new();

        filter.merge_entities(
            &[DetectedEntity::new("ORGANIZATION", "Initech", 97.0)],
            &mut entities,
        );
        let outcome = filter.merge_entities(
            &[
                DetectedEntity::new("ORGANIZATION", "Amazon\n", 98.0),
                DetectedEntity::new("PERSON", "Jane Doe", 60.0),
            ],
            &mut entities,
        );

        assert_eq!(entities.len(), 1);
        assert_eq!(entities["ORGANIZATION"], "Amazon");
        assert_eq!(outcome.overwritten, 1);
        assert_eq!(outcome.discarded, 1);
    }

    #[test]
    fn test_entity_type_is_stripped() {
        let filter = ScoreFilter::default();
        let mut entities = BTreeMap::new();

        filter.merge_entities(
            &[DetectedEntity::new("LOCATION\r\n", "Seattle", 91.0)],
            &mut entities,
        );

        assert_eq!(entities.get("LOCATION").map(String::as_str), Some("Seattle"));
    }
}
