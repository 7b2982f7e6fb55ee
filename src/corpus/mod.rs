//! Corpus Module
//!
//! Everything that touches the text files on disk.
//!
//! ## Data Flow
//! 1. **Enumerate**: `Corpus::list_files` re-globs the corpus pattern on every call.
//! 2. **Scan**: `scan_file` counts exact, case-sensitive matches of one word in one file.
//! 3. **Aggregate**: `FrequencyAggregator` scans every file through a bounded
//!    `WorkerPool` and reduces the per-file results into TF and DF.
//!
//! A file that cannot be read contributes nothing and is logged. Failing to list
//! the corpus at all is an error for the caller.

pub mod aggregator;
pub mod enumerator;
pub mod scanner;
pub mod types;

#[cfg(test)]
mod tests;
