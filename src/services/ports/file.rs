use crate::core::LocalBoxFuture;

/// A file the user chose, loaded into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Milliseconds since the Unix epoch; 0 when unknown.
    pub last_modified: u64,
}

/// Asks the user for a file. Resolves to `None` when nothing was picked or the
/// file could not be read.
pub trait FilePicker {
    fn pick(&self) -> LocalBoxFuture<'_, Option<PickedFile>>;
}
