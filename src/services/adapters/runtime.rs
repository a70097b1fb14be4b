use std::cell::RefCell;

use tokio::task::JoinHandle;

use crate::core::LocalBoxFuture;
use crate::services::ports::LocalExecutor;

/// Spawns onto the current `tokio::task::LocalSet` and keeps the handles so the
/// caller can wait for the work to settle.
///
/// Must be used from within a running `LocalSet`; the binary drives the whole
/// shell inside one.
#[derive(Debug, Default)]
pub struct TokioLocalExecutor {
    tasks: RefCell<Vec<JoinHandle<()>>>,
}

impl TokioLocalExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawned tasks not yet awaited by [`drain`](Self::drain).
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Awaits every spawned task, including tasks spawned while draining.
    /// Returns how many were awaited. A task that panicked is logged and skipped.
    pub async fn drain(&self) -> usize {
        let mut awaited = 0;
        loop {
            let batch: Vec<JoinHandle<()>> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                return awaited;
            }
            for handle in batch {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "spawned task did not complete");
                }
                awaited += 1;
            }
        }
    }
}

impl LocalExecutor for TokioLocalExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        let handle = tokio::task::spawn_local(task);
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/adapters/runtime.rs"]
mod tests;
