//! Bounded Worker Pool
//!
//! Runs one async task per input item with a fixed upper bound on how many are
//! in flight at once. Items beyond the bound wait on a semaphore permit, which
//! acts as the work queue. The caller gets every result back in input order once
//! the whole batch has finished, so the reduction step can run single-threaded.

use crate::error::{Result, StatsError};

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// Label used in log lines and worker errors.
    name: &'static str,
    /// Maximum number of tasks running at the same time.
    limit: usize,
}

impl WorkerPool {
    /// Creates a pool. A limit of zero is treated as one.
    pub fn new(name: &'static str, limit: usize) -> Self {
        Self {
            name,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Applies `task` to every item concurrently and waits for all of them.
    ///
    /// The returned vector has one entry per input item, in the same order.
    /// An entry is `Err(StatsError::Worker)` only if its task panicked; a panic
    /// never affects the other entries.
    pub async fn map<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> Vec<Result<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let task = Arc::new(task);
        let mut set = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let semaphore = semaphore.clone();
            let task = task.clone();
            set.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = semaphore.acquire_owned().await;
                (index, task(item).await)
            });
        }

        tracing::trace!(
            "Pool '{}' spawned {} tasks (limit {})",
            self.name,
            total,
            self.limit
        );

        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, value)) => slots[index] = Some(value),
                Err(e) => {
                    tracing::error!("Pool '{}' task did not complete: {}", self.name, e);
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    StatsError::Worker(format!(
                        "task {} in pool '{}' panicked or was cancelled",
                        index, self.name
                    ))
                })
            })
            .collect()
    }
}
