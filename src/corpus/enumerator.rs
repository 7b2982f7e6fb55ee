//! Corpus Enumerator
//!
//! Lists the files that make up the corpus. Nothing is cached: the pattern is
//! evaluated again on every call so the list always reflects the directory.

use crate::error::Result;

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Corpus {
    pattern: String,
}

impl Corpus {
    /// Creates a corpus over a glob pattern such as `./data/*.txt`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Returns every path matching the pattern, skipping directories.
    ///
    /// # Errors
    /// * `StatsError::CorpusPattern` if the pattern is malformed.
    /// * `StatsError::CorpusListing` if a directory on the path cannot be read.
    ///
    /// This does blocking filesystem work; async callers should run it on the
    /// blocking pool.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in glob::glob(&self.pattern)? {
            let path = entry?;
            if path.is_dir() {
                tracing::trace!("Skipping directory {}", path.display());
                continue;
            }
            files.push(path);
        }

        tracing::debug!("Corpus '{}' matched {} files", self.pattern, files.len());
        Ok(files)
    }
}
