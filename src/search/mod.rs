//! Search Service Module
//!
//! Turns a batch of requested words into fresh statistics.
//!
//! ## Overview
//! A query fans out one store update per requested word through a bounded
//! `WorkerPool`, waits for all of them, then reads back the current record of
//! each distinct word. Every update in turn fans out one scan per corpus file.
//!
//! ## Submodules
//! - **`engine`**: `QueryEngine`, the orchestrator shared by all requests.
//! - **`handlers`**: Axum handlers and the router.
//! - **`types`**: Request/response DTOs, endpoint paths and `DuplicatePolicy`.

pub mod engine;
pub mod handlers;
pub mod types;
