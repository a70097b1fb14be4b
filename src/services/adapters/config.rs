use serde_json::{Map, Value};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::core::LocalBoxFuture;
use crate::services::error::SettingsError;
use crate::services::ports::settings::{merge_value, ConfigurationStore};

/// Configuration held in memory for the lifetime of the shell.
pub struct InMemoryConfigurationStore {
    value: RefCell<Value>,
}

impl InMemoryConfigurationStore {
    pub fn new() -> Self {
        Self::with_value(Value::Object(Map::new()))
    }

    pub fn with_value(value: Value) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }
}

impl Default for InMemoryConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationStore for InMemoryConfigurationStore {
    fn read(&self) -> LocalBoxFuture<'_, Result<Value, SettingsError>> {
        let value = self.value.borrow().clone();
        Box::pin(async move {
            if value.is_object() {
                Ok(value)
            } else {
                Err(SettingsError::NotAnObject)
            }
        })
    }

    fn write(&self, patch: &Value) -> Result<(), SettingsError> {
        if !patch.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        merge_value(&mut *self.value.borrow_mut(), patch);
        Ok(())
    }
}

/// Configuration persisted as a pretty-printed JSON object.
///
/// A missing file reads as `{}`. Writes are synchronous so a following read
/// always sees them.
pub struct JsonFileConfigurationStore {
    path: PathBuf,
}

impl JsonFileConfigurationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_sync(&self) -> Result<Value, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => parse_object(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Object(Map::new())),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_object(data: &str) -> Result<Value, SettingsError> {
    if data.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let value: Value = serde_json::from_str(data)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(SettingsError::NotAnObject)
    }
}

impl ConfigurationStore for JsonFileConfigurationStore {
    fn read(&self) -> LocalBoxFuture<'_, Result<Value, SettingsError>> {
        Box::pin(async move {
            match tokio::fs::read_to_string(&self.path).await {
                Ok(data) => parse_object(&data),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Ok(Value::Object(Map::new()))
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    fn write(&self, patch: &Value) -> Result<(), SettingsError> {
        if !patch.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        let mut value = self.load_sync()?;
        merge_value(&mut value, patch);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&value)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "configuration written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/adapters/config.rs"]
mod tests;
