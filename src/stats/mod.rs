//! Word Statistics Module
//!
//! The only long-lived shared mutable state in the service: a concurrent map
//! from word to its `WordStatistics` record.
//!
//! ## Update Protocol
//! 1. Fetch or lazily create the record.
//! 2. Compute a fresh `Measurement` from the corpus, without holding any lock.
//! 3. Shift the current TF/DF into `last_tf`/`last_df`, store the new values,
//!    append to history and bump the search counter. This step runs under the
//!    word's map entry lock, so concurrent updates of the same word can never
//!    lose each other's measurements.
//!
//! ## Submodules
//! - **`store`**: `WordStatsStore`, the `DashMap`-backed owner of all records.
//! - **`types`**: `WordStatistics` and `Measurement`, also the wire format.

pub mod store;
pub mod types;
