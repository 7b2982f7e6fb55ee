//! Word Statistics Service Library
//!
//! Computes term frequency (TF) and document frequency (DF) of words over a
//! fixed corpus of text files, and keeps a running history of every word's
//! measurements and how often it was searched. The binary (`main.rs`) exposes
//! this over HTTP.
//!
//! ## Architecture Modules
//! - **`corpus`**: Lists corpus files, scans single files, and aggregates
//!   per-file counts into TF/DF.
//! - **`executor`**: The bounded fan-out/fan-in primitive used for both the
//!   per-word and per-file parallelism.
//! - **`stats`**: The concurrent word statistics store and its update protocol.
//! - **`search`**: The query orchestrator and its HTTP handlers.
//! - **`config`**: Command line / environment configuration.
//! - **`error`**: The error taxonomy surfaced at the request boundary.

pub mod config;
pub mod corpus;
pub mod error;
pub mod executor;
pub mod search;
pub mod stats;
