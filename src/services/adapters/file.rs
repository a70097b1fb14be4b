use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::core::LocalBoxFuture;
use crate::services::ports::{FilePicker, PickedFile};

/// Picks files from a queue of paths supplied ahead of time, standing in for an
/// interactive file dialog.
#[derive(Default)]
pub struct PathFilePicker {
    queue: RefCell<VecDeque<PathBuf>>,
}

impl PathFilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `pick` resolves to this path.
    pub fn queue(&self, path: impl Into<PathBuf>) {
        self.queue.borrow_mut().push_back(path.into());
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FilePicker for PathFilePicker {
    fn pick(&self) -> LocalBoxFuture<'_, Option<PickedFile>> {
        let next = self.queue.borrow_mut().pop_front();
        Box::pin(async move {
            let path = next?;
            let name = path.file_name()?.to_string_lossy().into_owned();
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "picked file unreadable");
                    return None;
                }
            };
            let last_modified = tokio::fs::metadata(&path)
                .await
                .ok()
                .and_then(|meta| meta.modified().ok())
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or(0);
            Some(PickedFile {
                name,
                bytes,
                last_modified,
            })
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/adapters/file.rs"]
mod tests;
