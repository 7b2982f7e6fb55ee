//! Parallel Fan-Out Module
//!
//! The engine fans out work at two levels: one update per requested word, and
//! one file scan per corpus file for each of those words. Both levels go through
//! the same primitive so that the "spawn N tasks, wait for all, then reduce"
//! pattern is implemented exactly once.
//!
//! ## Submodules
//! - **`pool`**: `WorkerPool`, a bounded map over a batch of items backed by a
//!   semaphore and a `JoinSet`.

pub mod pool;
