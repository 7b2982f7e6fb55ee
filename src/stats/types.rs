use serde::{Deserialize, Serialize};

/// One computed (TF, DF) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Total occurrences across all corpus files.
    pub tf: u64,
    /// Number of files containing the word at least once.
    pub df: u64,
}

impl Measurement {
    pub fn new(tf: u64, df: u64) -> Self {
        Self { tf, df }
    }
}

/// Everything recorded about a word since the process started.
///
/// Serialized in camelCase, which is the shape returned by the HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStatistics {
    pub tf: u64,
    pub df: u64,
    pub search_count: u64,
    pub last_tf: u64,
    pub last_df: u64,
    /// Every measurement ever taken, oldest first.
    pub search_history: Vec<Measurement>,
}

impl WordStatistics {
    /// Records one measurement: shift, set, append, count.
    pub fn record(&mut self, measurement: Measurement) {
        self.last_tf = self.tf;
        self.last_df = self.df;
        self.tf = measurement.tf;
        self.df = measurement.df;
        self.search_history.push(measurement);
        self.search_count += 1;
    }

    /// The most recent measurement, if any has been taken.
    pub fn latest(&self) -> Option<Measurement> {
        self.search_history.last().copied()
    }
}
