use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::services::SettingsError;

fn default_enabled() -> bool {
    true
}

/// One entry of `extensions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionManifest {
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionsConfig {
    #[serde(default)]
    pub extensions: Vec<ExtensionManifest>,
}

impl ExtensionsConfig {
    pub fn parse(data: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(data)?)
    }

    /// A missing file means every built-in extension is enabled.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::parse(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Extensions not listed are enabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.extensions
            .iter()
            .find(|m| m.id == id)
            .map_or(true, |m| m.enabled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extension/manifest.rs"]
mod tests;
