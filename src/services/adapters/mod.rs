//! Service adapters: OS/runtime specific implementations of the ports.

pub mod config;
pub mod file;
pub mod runtime;
pub mod settings;

pub use config::{InMemoryConfigurationStore, JsonFileConfigurationStore};
pub use file::PathFilePicker;
pub use runtime::TokioLocalExecutor;
pub use settings::{
    default_configuration, ensure_log_dir, ensure_settings_file, get_extensions_path,
    get_log_dir, get_settings_path,
};
