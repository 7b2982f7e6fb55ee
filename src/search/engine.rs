//! Query Orchestrator
//!
//! `QueryEngine` owns the shared store and the frequency aggregator. It is
//! created once at startup and handed to every request behind an `Arc`.

use super::types::{DuplicatePolicy, SearchResponse};
use crate::config::Config;
use crate::corpus::aggregator::FrequencyAggregator;
use crate::corpus::enumerator::Corpus;
use crate::error::{Result, StatsError};
use crate::executor::pool::WorkerPool;
use crate::stats::store::WordStatsStore;

use std::collections::HashSet;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Cheap to clone: every field is shared or `Copy`.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<WordStatsStore>,
    aggregator: Arc<FrequencyAggregator>,
    /// Bounds how many words of one query are updated at the same time.
    pool: WorkerPool,
    duplicates: DuplicatePolicy,
}

impl QueryEngine {
    pub fn new(
        store: Arc<WordStatsStore>,
        aggregator: FrequencyAggregator,
        word_workers: usize,
        duplicates: DuplicatePolicy,
    ) -> Self {
        Self {
            store,
            aggregator: Arc::new(aggregator),
            pool: WorkerPool::new("word-update", word_workers),
            duplicates,
        }
    }

    /// Builds an engine with an empty store from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        let aggregator = FrequencyAggregator::new(
            Corpus::new(config.corpus_pattern.clone()),
            config.file_workers,
            config.scan,
        );
        Self::new(
            WordStatsStore::new(),
            aggregator,
            config.word_workers,
            config.duplicates,
        )
    }

    pub fn store(&self) -> &Arc<WordStatsStore> {
        &self.store
    }

    /// Measures every requested word and returns the resulting records.
    ///
    /// All updates run to completion before anything is read back. If any of
    /// them fails (for example because the corpus cannot be listed) the first
    /// failure is returned; updates that did succeed stay recorded.
    ///
    /// The batch runs on its own task, so dropping the returned future (a
    /// client hanging up, a caller timeout) does not cancel updates that were
    /// already issued.
    ///
    /// # Errors
    /// * `StatsError::Validation` if `words` is empty. The store is untouched.
    pub async fn query_words(&self, words: Vec<String>) -> Result<SearchResponse> {
        if words.is_empty() {
            return Err(StatsError::Validation(
                "Missing 'words' to search for".to_string(),
            ));
        }

        let span = tracing::info_span!("query", id = %Uuid::new_v4());
        let engine = self.clone();
        tokio::spawn(async move { engine.run_query(words).await }.instrument(span))
            .await
            .map_err(|e| StatsError::Worker(format!("query task failed: {}", e)))?
    }

    async fn run_query(&self, words: Vec<String>) -> Result<SearchResponse> {
        let requested = words.len();
        let mut distinct: Vec<String> = Vec::new();
        {
            let mut seen = HashSet::new();
            for word in &words {
                if seen.insert(word.as_str()) {
                    distinct.push(word.clone());
                }
            }
        }

        let updates = match self.duplicates {
            DuplicatePolicy::PerOccurrence => words,
            DuplicatePolicy::Once => distinct.clone(),
        };

        tracing::info!(
            "Query for {} words ({} distinct, {} updates)",
            requested,
            distinct.len(),
            updates.len()
        );

        let store = self.store.clone();
        let aggregator = self.aggregator.clone();
        let results = self
            .pool
            .map(updates, move |word: String| {
                let store = store.clone();
                let aggregator = aggregator.clone();
                async move {
                    let result = store.update_word(&word, &aggregator).await;
                    (word, result)
                }
                .in_current_span()
            })
            .await;

        let mut first_error = None;
        for outcome in results {
            let error = match outcome {
                Ok((_, Ok(_))) => continue,
                Ok((word, Err(e))) => {
                    tracing::error!("Failed to update word '{}': {}", word, e);
                    e
                }
                Err(e) => {
                    tracing::error!("Word update task failed: {}", e);
                    e
                }
            };
            first_error.get_or_insert(error);
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        Ok(distinct
            .into_iter()
            .map(|word| {
                let stats = self.store.snapshot(&word).unwrap_or_default();
                (word, stats)
            })
            .collect())
    }
}
