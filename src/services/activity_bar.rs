use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};

use super::collection::{Item, ItemCollection, SelectionState, SelectionStatePatch};
use super::error::StateError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBarItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl ActivityBarItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_name: None,
            title: None,
            checked: false,
            disabled: false,
        }
    }

    pub fn with_icon(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityBarItemPatch {
    pub name: Option<String>,
    pub icon_name: Option<String>,
    pub title: Option<String>,
    pub checked: Option<bool>,
    pub disabled: Option<bool>,
}

impl Item for ActivityBarItem {
    type Patch = ActivityBarItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: ActivityBarItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon_name) = patch.icon_name {
            self.icon_name = Some(icon_name);
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(checked) = patch.checked {
            self.checked = checked;
        }
        if let Some(disabled) = patch.disabled {
            self.disabled = disabled;
        }
    }
}

/// Payload of an activity-bar selection. `item` is the instance stored in the bar.
#[derive(Clone, Debug)]
pub struct ActivityBarSelect {
    pub item: Rc<ActivityBarItem>,
    pub previous: Option<String>,
}

pub struct ActivityBarService {
    items: RefCell<ItemCollection<ActivityBarItem>>,
    state: RefCell<SelectionState>,
    on_select: EventBus<ActivityBarSelect>,
}

impl ActivityBarService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            items: RefCell::new(ItemCollection::new(Self::NAME)),
            state: RefCell::new(SelectionState::default()),
            on_select: EventBus::new(Self::NAME, "select", sink),
        }
    }

    pub fn add(&self, item: ActivityBarItem) -> Result<(), StateError> {
        let item = self.items.borrow_mut().add(item)?;
        tracing::debug!(id = %item.id, "activity bar item added");
        Ok(())
    }

    pub fn push(&self, item: ActivityBarItem) -> Result<(), StateError> {
        self.add(item)
    }

    pub fn update(&self, id: &str, patch: ActivityBarItemPatch) -> Result<(), StateError> {
        self.items.borrow_mut().update(id, patch)
    }

    pub fn remove(&self, id: &str) -> Result<(), StateError> {
        self.items.borrow_mut().remove(id)?;
        let mut state = self.state.borrow_mut();
        if state.current.as_deref() == Some(id) {
            state.current = None;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Rc<ActivityBarItem>> {
        self.items.borrow().get(id)
    }

    pub fn items(&self) -> Vec<Rc<ActivityBarItem>> {
        self.items.borrow().items()
    }

    pub fn get_state(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn update_state(&self, patch: SelectionStatePatch) {
        self.state.borrow_mut().merge(patch);
    }

    pub fn on_select<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&ActivityBarSelect) -> HandlerResult + 'static,
    {
        self.on_select.subscribe(handler)
    }

    /// Host trigger: the user clicked the item `id`.
    pub fn select(&self, id: &str) -> Result<(), StateError> {
        let item = self
            .get(id)
            .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
        let previous = self.state.borrow_mut().current.replace(id.to_string());
        tracing::debug!(id, "activity bar select");
        self.on_select.emit(&ActivityBarSelect { item, previous });
        Ok(())
    }
}

impl Service for ActivityBarService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for ActivityBarService {
    const NAME: &'static str = "activityBar";
}

#[cfg(test)]
#[path = "../../tests/unit/services/activity_bar.rs"]
mod tests;
