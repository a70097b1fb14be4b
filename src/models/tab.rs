use serde::{Deserialize, Serialize};

use super::tree_node::FileType;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabData {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// An open editor tab. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTab {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub modified: bool,
    #[serde(default)]
    pub data: TabData,
}

impl EditorTab {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            file_type: None,
            icon: None,
            modified: false,
            data: TabData::default(),
        }
    }

    pub fn with_data(mut self, data: TabData) -> Self {
        self.data = data;
        self
    }
}

/// Editor language for a file extension; unknown extensions map to `""`.
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext {
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "html" => "html",
        "css" | "scss" | "less" => "css",
        "json" => "json",
        _ => "",
    }
}
