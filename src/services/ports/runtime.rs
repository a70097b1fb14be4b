use crate::core::LocalBoxFuture;

/// Runs `!Send` futures on the host's thread.
///
/// Extensions hand their asynchronous work (file reads, delayed search results)
/// to the executor instead of blocking the dispatching handler.
pub trait LocalExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
