use crate::stats::types::WordStatistics;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// --- API Endpoints ---

/// Takes a new measurement for every requested word.
pub const ENDPOINT_SEARCH: &str = "/search";
/// Reads a word's record without measuring it again.
pub const ENDPOINT_WORD: &str = "/words/:word";
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// Body of `POST /search`. `words` is required and must be non-empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub words: Vec<String>,
}

/// Body of a successful `POST /search`: one entry per distinct requested word.
pub type SearchResponse = HashMap<String, WordStatistics>;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Number of distinct words tracked so far.
    pub words: usize,
}

/// How repeated words inside one request are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Every occurrence takes its own measurement and bumps the search count.
    #[default]
    PerOccurrence,
    /// Each distinct word is measured once per request.
    Once,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "per-occurrence" | "per_occurrence" => Ok(DuplicatePolicy::PerOccurrence),
            "once" => Ok(DuplicatePolicy::Once),
            other => Err(format!(
                "unknown duplicate policy '{}' (expected 'per-occurrence' or 'once')",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::PerOccurrence => write!(f, "per-occurrence"),
            DuplicatePolicy::Once => write!(f, "once"),
        }
    }
}
