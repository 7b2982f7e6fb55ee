//! Word Statistics Store
//!
//! Wraps a `DashMap<String, WordStatistics>`. Reads hand out clones so no
//! shard lock escapes this module, and every mutation goes through
//! `apply_measurement`, which holds the entry lock only for the in-memory
//! read-modify-write.

use super::types::{Measurement, WordStatistics};
use crate::corpus::aggregator::FrequencyAggregator;
use crate::error::Result;

use dashmap::DashMap;
use std::sync::Arc;

pub struct WordStatsStore {
    words: DashMap<String, WordStatistics>,
}

impl WordStatsStore {
    /// Creates a new, empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the record for `word`, inserting a zeroed one if it is new.
    pub fn get_or_create(&self, word: &str) -> WordStatistics {
        if let Some(existing) = self.words.get(word) {
            return existing.value().clone();
        }
        self.words
            .entry(word.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Atomically records `measurement` for `word` and returns the new state.
    pub fn apply_measurement(&self, word: &str, measurement: Measurement) -> WordStatistics {
        let mut entry = self.words.entry(word.to_string()).or_default();
        entry.record(measurement);
        entry.value().clone()
    }

    /// Takes a new measurement of `word` from the corpus and records it.
    ///
    /// The corpus scan runs outside of any lock. If the corpus cannot be
    /// listed the error is returned and nothing is recorded.
    pub async fn update_word(
        &self,
        word: &str,
        aggregator: &FrequencyAggregator,
    ) -> Result<WordStatistics> {
        self.words.entry(word.to_string()).or_default();

        let measurement = aggregator.compute_frequencies(word).await?;
        let stats = self.apply_measurement(word, measurement);

        tracing::debug!(
            "Updated '{}': tf={} df={} searches={}",
            word,
            stats.tf,
            stats.df,
            stats.search_count
        );
        Ok(stats)
    }

    /// Current record for `word`, or `None` if it was never requested.
    pub fn snapshot(&self, word: &str) -> Option<WordStatistics> {
        self.words.get(word).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Number of distinct words tracked.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordStatsStore {
    fn default() -> Self {
        Self {
            words: DashMap::new(),
        }
    }
}
