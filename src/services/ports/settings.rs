use serde_json::Value;

use crate::core::LocalBoxFuture;
use crate::services::error::SettingsError;

/// Backing store of the configuration object.
///
/// `write` merges into the stored object and is durable when it returns: a
/// `read` issued afterwards observes it.
pub trait ConfigurationStore {
    fn read(&self) -> LocalBoxFuture<'_, Result<Value, SettingsError>>;

    fn write(&self, patch: &Value) -> Result<(), SettingsError>;
}

/// Recursively merges `patch` into `target`. Objects merge key by key, any other
/// value replaces what was there.
pub fn merge_value(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_value(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/ports/settings.rs"]
mod tests;
