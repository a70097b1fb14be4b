//! Folder-tree node model.

use serde::{Deserialize, Serialize};

use super::tab::TabData;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    RootFolder,
    Folder,
    File,
}

impl FileType {
    pub fn is_folder(self) -> bool {
        matches!(self, FileType::RootFolder | FileType::Folder)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::RootFolder => "RootFolder",
            FileType::Folder => "Folder",
            FileType::File => "File",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RootFolder" => Some(FileType::RootFolder),
            "Folder" => Some(FileType::Folder),
            "File" => Some(FileType::File),
            _ => None,
        }
    }
}

/// A node of the folder tree. Children are owned by their parent, so a node can
/// never appear under two parents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub file_type: FileType,
    pub is_leaf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TabData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_type,
            is_leaf: file_type == FileType::File,
            location: None,
            icon: None,
            is_editable: false,
            content: None,
            data: None,
            children: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.is_editable = editable;
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Removes the descendant with `id`, returning it with its subtree.
    pub fn remove_descendant(&mut self, id: &str) -> Option<TreeNode> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Visits this node and every descendant, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TreeNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if node.is_leaf {
                count += 1;
            }
        });
        count
    }

    /// The part of the name after the last `.`, or empty.
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => "",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/tree_node.rs"]
mod tests;
