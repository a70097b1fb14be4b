//! Ordered, id-keyed item storage shared by the activity bar, sidebar and menu bar.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::error::StateError;

pub trait Item: Clone + 'static {
    type Patch;

    fn id(&self) -> &str;

    fn apply(&mut self, patch: Self::Patch);

    /// Visits this item's id and every id nested inside it.
    fn walk_ids<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        visit(self.id());
    }

    /// Whether `id` names this item or anything nested inside it.
    fn contains(&self, id: &str) -> bool {
        self.id() == id
    }

    fn find(&self, id: &str) -> Option<&Self> {
        if self.id() == id {
            Some(self)
        } else {
            None
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id() == id {
            Some(self)
        } else {
            None
        }
    }
}

/// Items in insertion order. Ids are unique: adding a known id is rejected.
///
/// Items are shared as `Rc<T>` so event payloads can hand out the exact value
/// that was registered; `update` replaces the stored `Rc` copy-on-write.
pub struct ItemCollection<T: Item> {
    service: &'static str,
    items: Vec<Rc<T>>,
}

impl<T: Item> ItemCollection<T> {
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            items: Vec::new(),
        }
    }

    /// Rejects `item` if any id inside it is already stored or repeats within it.
    pub fn add(&mut self, item: T) -> Result<Rc<T>, StateError> {
        if let Some(id) = self.first_duplicate(&item) {
            return Err(StateError::duplicate(self.service, id));
        }
        let item = Rc::new(item);
        self.items.push(Rc::clone(&item));
        Ok(item)
    }

    fn first_duplicate(&self, item: &T) -> Option<String> {
        let mut seen = FxHashSet::default();
        let mut duplicate = None;
        item.walk_ids(&mut |id| {
            if duplicate.is_none()
                && (!seen.insert(id) || self.items.iter().any(|existing| existing.contains(id)))
            {
                duplicate = Some(id.to_string());
            }
        });
        duplicate
    }

    pub fn update(&mut self, id: &str, patch: T::Patch) -> Result<(), StateError> {
        let service = self.service;
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.contains(id))
            .ok_or_else(|| StateError::not_found(service, id))?;
        match Rc::make_mut(slot).find_mut(id) {
            Some(target) => {
                target.apply(patch);
                Ok(())
            }
            None => Err(StateError::not_found(service, id)),
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<Rc<T>, StateError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StateError::not_found(self.service, id))?;
        Ok(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<Rc<T>> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Finds `id` at any depth, returning a copy.
    pub fn find(&self, id: &str) -> Option<T> {
        self.items
            .iter()
            .find_map(|item| item.find(id))
            .cloned()
    }

    pub fn items(&self) -> Vec<Rc<T>> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ambient state of a collection service: the current item and visibility.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub current: Option<String>,
    pub hidden: bool,
}

/// Shallow patch over [`SelectionState`]; `None` fields keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionStatePatch {
    pub current: Option<String>,
    pub hidden: Option<bool>,
}

impl SelectionState {
    pub fn merge(&mut self, patch: SelectionStatePatch) {
        if let Some(current) = patch.current {
            self.current = Some(current);
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/collection.rs"]
mod tests;
