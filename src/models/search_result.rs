use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub key: String,
    pub name: String,
    pub is_leaf: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SearchResult>,
}

impl SearchResult {
    pub fn leaf(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            is_leaf: true,
            children: Vec::new(),
        }
    }

    pub fn group(key: impl Into<String>, name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            is_leaf: false,
            children,
        }
    }

    pub fn find(&self, key: &str) -> Option<&SearchResult> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf {
            1
        } else {
            self.children.iter().map(SearchResult::leaf_count).sum()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateKind {
    Info,
    Warning,
    Error,
}

/// Advisory banner shown above search results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateInfo {
    #[serde(rename = "type")]
    pub kind: ValidateKind,
    pub text: String,
}

impl ValidateInfo {
    pub fn new(kind: ValidateKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
