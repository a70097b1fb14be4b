//! Service ports: the traits host services reach the outside world through.

pub mod file;
pub mod runtime;
pub mod settings;

pub use file::{FilePicker, PickedFile};
pub use runtime::LocalExecutor;
pub use settings::ConfigurationStore;
