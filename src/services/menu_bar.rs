use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};

use super::collection::{Item, ItemCollection, SelectionState, SelectionStatePatch};
use super::error::StateError;

pub const MENU_FILE: &str = "File";
pub const MENU_FILE_OPEN: &str = "openFile";
pub const MENU_VIEW: &str = "View";
pub const MENU_VIEW_ACTIVITYBAR: &str = "workbench.action.appearance.activityBar";
pub const MENU_VIEW_MENUBAR: &str = "workbench.action.appearance.menuBar";
pub const MENU_VIEW_STATUSBAR: &str = "workbench.action.appearance.statusBar";

pub const ICON_CHECK: &str = "check";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
}

impl Item for MenuItem {
    type Patch = MenuItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: MenuItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
    }

    fn walk_ids<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        visit(&self.id);
        for child in &self.children {
            child.walk_ids(visit);
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|child| child.contains(id))
    }

    fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

/// The menu tree every shell starts with.
pub fn default_menus() -> Vec<MenuItem> {
    vec![
        MenuItem::new(MENU_FILE, "File")
            .with_children(vec![MenuItem::new(MENU_FILE_OPEN, "Open")]),
        MenuItem::new(MENU_VIEW, "View").with_children(vec![
            MenuItem::new(MENU_VIEW_ACTIVITYBAR, "Show Activity Bar").with_icon(ICON_CHECK),
            MenuItem::new(MENU_VIEW_MENUBAR, "Show Menu Bar").with_icon(ICON_CHECK),
            MenuItem::new(MENU_VIEW_STATUSBAR, "Show Status Bar").with_icon(ICON_CHECK),
        ]),
    ]
}

pub struct MenuBarService {
    menus: RefCell<ItemCollection<MenuItem>>,
    state: RefCell<SelectionState>,
    on_select: EventBus<str>,
}

impl MenuBarService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            menus: RefCell::new(ItemCollection::new(Self::NAME)),
            state: RefCell::new(SelectionState::default()),
            on_select: EventBus::new(Self::NAME, "select", sink),
        }
    }

    pub fn with_default_menus(sink: Rc<dyn ErrorSink>) -> Self {
        let service = Self::new(sink);
        {
            let mut menus = service.menus.borrow_mut();
            for menu in default_menus() {
                // Ids in the default tree are distinct.
                let _ = menus.add(menu);
            }
        }
        service
    }

    pub fn add(&self, menu: MenuItem) -> Result<(), StateError> {
        let menu = self.menus.borrow_mut().add(menu)?;
        tracing::debug!(id = %menu.id, "menu added");
        Ok(())
    }

    pub fn push(&self, menu: MenuItem) -> Result<(), StateError> {
        self.add(menu)
    }

    /// Updates the menu entry `id` at any depth of the menu tree.
    pub fn update(&self, id: &str, patch: MenuItemPatch) -> Result<(), StateError> {
        self.menus.borrow_mut().update(id, patch)
    }

    pub fn remove(&self, id: &str) -> Result<(), StateError> {
        self.menus.borrow_mut().remove(id).map(|_| ())
    }

    pub fn find(&self, id: &str) -> Option<MenuItem> {
        self.menus.borrow().find(id)
    }

    pub fn menus(&self) -> Vec<Rc<MenuItem>> {
        self.menus.borrow().items()
    }

    pub fn get_state(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn update_state(&self, patch: SelectionStatePatch) {
        self.state.borrow_mut().merge(patch);
    }

    pub fn on_select<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&str) -> HandlerResult + 'static,
    {
        self.on_select.subscribe(handler)
    }

    /// Host trigger: the user picked the menu entry `menu_id`.
    pub fn select(&self, menu_id: &str) -> Result<(), StateError> {
        if self.find(menu_id).is_none() {
            return Err(StateError::not_found(Self::NAME, menu_id));
        }
        self.state.borrow_mut().current = Some(menu_id.to_string());
        tracing::debug!(menu_id, "menu select");
        self.on_select.emit(menu_id);
        Ok(())
    }
}

impl Service for MenuBarService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for MenuBarService {
    const NAME: &'static str = "menuBar";
}

#[cfg(test)]
#[path = "../../tests/unit/services/menu_bar.rs"]
mod tests;
