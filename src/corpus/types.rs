use std::time::Duration;

/// Outcome of scanning one file for one word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileScan {
    /// Number of whitespace-delimited tokens equal to the word.
    pub occurrences: u64,
    /// True if the word appeared at least once.
    pub present: bool,
}

impl FileScan {
    pub fn from_occurrences(occurrences: u64) -> Self {
        Self {
            occurrences,
            present: occurrences > 0,
        }
    }
}

/// Per-file scanning behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Upper bound on the time one scan may take. `None` means unbounded.
    pub timeout: Option<Duration>,
    /// Total tries per file when a read fails with a transient error.
    pub attempts: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            attempts: 1,
        }
    }
}
