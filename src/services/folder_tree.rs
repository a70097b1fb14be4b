//! Folder tree service: an ordered forest of [`TreeNode`]s.
//!
//! Node ids are unique across the whole forest. Every mutation validates before
//! touching the forest, so a rejected call leaves it exactly as it was.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};
use crate::models::{FileType, TreeNode};

use super::error::StateError;

/// The UI asked for a new node; handlers decide whether and what to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateRequest {
    pub file_type: FileType,
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FolderTreeState {
    pub roots: Vec<TreeNode>,
    pub current: Option<String>,
}

impl FolderTreeState {
    fn find(&self, id: &str) -> Option<&TreeNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    fn ids(&self) -> FxHashSet<String> {
        let mut ids = FxHashSet::default();
        for root in &self.roots {
            root.walk(&mut |node| {
                ids.insert(node.id.clone());
            });
        }
        ids
    }
}

pub struct FolderTreeService {
    state: RefCell<FolderTreeState>,
    on_create: EventBus<CreateRequest>,
    on_select_file: EventBus<TreeNode>,
}

impl FolderTreeService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            state: RefCell::new(FolderTreeState::default()),
            on_create: EventBus::new(Self::NAME, "create", Rc::clone(&sink)),
            on_select_file: EventBus::new(Self::NAME, "selectFile", sink),
        }
    }

    /// Inserts `node` as a root, or as the last child of `parent_id`.
    pub fn add(&self, node: TreeNode, parent_id: Option<&str>) -> Result<(), StateError> {
        let mut state = self.state.borrow_mut();

        let mut seen = state.ids();
        let mut duplicate = None;
        node.walk(&mut |n| {
            if duplicate.is_none() && !seen.insert(n.id.clone()) {
                duplicate = Some(n.id.clone());
            }
        });
        if let Some(id) = duplicate {
            return Err(StateError::duplicate(Self::NAME, id));
        }

        match parent_id {
            None => {
                tracing::debug!(id = %node.id, "folder tree root added");
                state.roots.push(node);
            }
            Some(parent_id) => {
                let parent = state
                    .find_mut(parent_id)
                    .ok_or_else(|| StateError::not_found(Self::NAME, parent_id))?;
                if parent.is_leaf {
                    return Err(StateError::NotAFolder {
                        id: parent_id.to_string(),
                    });
                }
                tracing::debug!(id = %node.id, parent = parent_id, "folder tree node added");
                parent.children.push(node);
            }
        }
        Ok(())
    }

    /// Removes `id` and its subtree.
    pub fn remove(&self, id: &str) -> Result<TreeNode, StateError> {
        let mut state = self.state.borrow_mut();
        let root_pos = state.roots.iter().position(|root| root.id == id);
        let removed = match root_pos {
            Some(pos) => Some(state.roots.remove(pos)),
            None => state
                .roots
                .iter_mut()
                .find_map(|root| root.remove_descendant(id)),
        };
        let removed = removed.ok_or_else(|| StateError::not_found(Self::NAME, id))?;
        if let Some(current) = state.current.clone() {
            if removed.find(&current).is_some() {
                state.current = None;
            }
        }
        Ok(removed)
    }

    /// Names a node, typically one inserted editable with an empty name.
    pub fn rename(&self, id: &str, name: impl Into<String>) -> Result<(), StateError> {
        let mut state = self.state.borrow_mut();
        let node = state
            .find_mut(id)
            .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
        node.name = name.into();
        node.is_editable = false;
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<TreeNode> {
        self.state.borrow().find(id).cloned()
    }

    pub fn snapshot(&self) -> Vec<TreeNode> {
        self.state.borrow().roots.clone()
    }

    pub fn get_state(&self) -> FolderTreeState {
        self.state.borrow().clone()
    }

    pub fn on_create<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&CreateRequest) -> HandlerResult + 'static,
    {
        self.on_create.subscribe(handler)
    }

    pub fn on_select_file<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&TreeNode) -> HandlerResult + 'static,
    {
        self.on_select_file.subscribe(handler)
    }

    /// Host trigger: the user asked for a new node. Nothing is created unless a
    /// handler inserts it.
    pub fn create(&self, file_type: FileType, parent_id: Option<&str>) {
        tracing::debug!(file_type = file_type.as_str(), parent = ?parent_id, "folder tree create");
        self.on_create.emit(&CreateRequest {
            file_type,
            parent_id: parent_id.map(str::to_string),
        });
    }

    /// Host trigger: the user activated node `id`. Only leaves fire `selectFile`.
    pub fn select_file(&self, id: &str) -> Result<(), StateError> {
        let node = {
            let mut state = self.state.borrow_mut();
            let node = state
                .find(id)
                .cloned()
                .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
            state.current = Some(id.to_string());
            node
        };
        if node.is_leaf {
            self.on_select_file.emit(&node);
        }
        Ok(())
    }
}

impl Service for FolderTreeService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for FolderTreeService {
    const NAME: &'static str = "folderTree";
}

#[cfg(test)]
#[path = "../../tests/unit/services/folder_tree.rs"]
mod tests;
