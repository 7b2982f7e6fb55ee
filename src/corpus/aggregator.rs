//! Frequency Aggregator
//!
//! Fans out one scan per corpus file and folds the results into a single
//! `Measurement`. Scans run independently on the worker pool and each one
//! fills its own result slot; the sum happens afterwards on the calling task,
//! so no lock is ever held around file I/O.

use super::enumerator::Corpus;
use super::scanner::scan_file;
use super::types::{FileScan, ScanOptions};
use crate::error::{Result, StatsError};
use crate::executor::pool::WorkerPool;
use crate::stats::types::Measurement;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FrequencyAggregator {
    corpus: Corpus,
    pool: WorkerPool,
    scan: ScanOptions,
}

impl FrequencyAggregator {
    /// # Arguments
    /// * `file_workers` - Maximum number of files scanned at once for one word.
    pub fn new(corpus: Corpus, file_workers: usize, scan: ScanOptions) -> Self {
        Self {
            corpus,
            pool: WorkerPool::new("file-scan", file_workers),
            scan,
        }
    }

    /// Computes total TF and DF for `word` over the current corpus.
    ///
    /// Fails only if the corpus cannot be listed; unreadable files just
    /// contribute zero.
    pub async fn compute_frequencies(&self, word: &str) -> Result<Measurement> {
        let corpus = self.corpus.clone();
        let files = tokio::task::spawn_blocking(move || corpus.list_files())
            .await
            .map_err(|e| StatsError::Worker(format!("corpus listing task failed: {}", e)))??;

        Ok(self.frequencies_in(files, word).await)
    }

    /// Scans an explicit list of files for `word` and reduces the results.
    pub async fn frequencies_in(&self, files: Vec<PathBuf>, word: &str) -> Measurement {
        let file_count = files.len();
        let word: Arc<str> = Arc::from(word);
        let options = self.scan;

        let task_word = word.clone();
        let scans = self
            .pool
            .map(files, move |path| {
                let word = task_word.clone();
                async move { scan_file(&path, &word, &options).await }
            })
            .await;

        let measurement = scans
            .into_iter()
            .map(|scan| {
                scan.unwrap_or_else(|e| {
                    tracing::warn!("Dropping scan result for word '{}': {}", word, e);
                    FileScan::default()
                })
            })
            .fold(Measurement::default(), |acc, scan| Measurement {
                tf: acc.tf + scan.occurrences,
                df: acc.df + u64::from(scan.present),
            });

        tracing::debug!(
            "Word '{}': tf={} df={} over {} files",
            word,
            measurement.tf,
            measurement.df,
            file_count
        );
        measurement
    }
}
