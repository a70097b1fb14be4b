use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};
use crate::models::{Element, Render};

use super::collection::{Item, ItemCollection, SelectionState, SelectionStatePatch};
use super::error::StateError;

#[derive(Clone)]
pub struct SidebarPane {
    pub id: String,
    pub title: String,
    pub render: Option<Render>,
}

impl SidebarPane {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            render: None,
        }
    }

    pub fn with_render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }
}

impl fmt::Debug for SidebarPane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarPane")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct SidebarPanePatch {
    pub title: Option<String>,
    pub render: Option<Render>,
}

impl Item for SidebarPane {
    type Patch = SidebarPanePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: SidebarPanePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(render) = patch.render {
            self.render = Some(render);
        }
    }
}

pub struct SidebarService {
    panes: RefCell<ItemCollection<SidebarPane>>,
    state: RefCell<SelectionState>,
    on_select: EventBus<SidebarPane>,
}

impl SidebarService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            panes: RefCell::new(ItemCollection::new(Self::NAME)),
            state: RefCell::new(SelectionState::default()),
            on_select: EventBus::new(Self::NAME, "select", sink),
        }
    }

    pub fn add(&self, pane: SidebarPane) -> Result<(), StateError> {
        let pane = self.panes.borrow_mut().add(pane)?;
        tracing::debug!(id = %pane.id, "sidebar pane added");
        Ok(())
    }

    pub fn push(&self, pane: SidebarPane) -> Result<(), StateError> {
        self.add(pane)
    }

    pub fn update(&self, id: &str, patch: SidebarPanePatch) -> Result<(), StateError> {
        self.panes.borrow_mut().update(id, patch)
    }

    pub fn remove(&self, id: &str) -> Result<(), StateError> {
        self.panes.borrow_mut().remove(id)?;
        let mut state = self.state.borrow_mut();
        if state.current.as_deref() == Some(id) {
            state.current = None;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Rc<SidebarPane>> {
        self.panes.borrow().get(id)
    }

    pub fn panes(&self) -> Vec<Rc<SidebarPane>> {
        self.panes.borrow().items()
    }

    pub fn get_state(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn update_state(&self, patch: SelectionStatePatch) {
        self.state.borrow_mut().merge(patch);
    }

    pub fn on_select<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&SidebarPane) -> HandlerResult + 'static,
    {
        self.on_select.subscribe(handler)
    }

    /// Host trigger: switch the visible pane to `id`.
    pub fn select(&self, id: &str) -> Result<(), StateError> {
        let pane = self
            .get(id)
            .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
        self.state.borrow_mut().current = Some(id.to_string());
        self.on_select.emit(&pane);
        Ok(())
    }

    /// Renders the current pane. `None` when nothing is selected, the current id
    /// has no registered pane, or the pane has no render callback.
    pub fn render_current(&self) -> Option<Element> {
        let current = self.state.borrow().current.clone()?;
        let render = self.get(&current)?.render.clone()?;
        Some(render())
    }
}

impl Service for SidebarService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for SidebarService {
    const NAME: &'static str = "sidebar";
}

#[cfg(test)]
#[path = "../../tests/unit/services/sidebar.rs"]
mod tests;
