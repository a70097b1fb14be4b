use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};
use crate::models::{EditorTab, Element, Render};

use super::error::StateError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub tabs: Vec<EditorTab>,
    pub current: Option<String>,
}

impl EditorState {
    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }
}

pub struct EditorService {
    state: RefCell<EditorState>,
    entry: RefCell<Option<Render>>,
    on_change_tab: EventBus<EditorTab>,
    on_select_tab: EventBus<EditorTab>,
    on_close_tab: EventBus<EditorTab>,
}

impl EditorService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            state: RefCell::new(EditorState::default()),
            entry: RefCell::new(None),
            on_change_tab: EventBus::new(Self::NAME, "changeTab", Rc::clone(&sink)),
            on_select_tab: EventBus::new(Self::NAME, "selectTab", Rc::clone(&sink)),
            on_close_tab: EventBus::new(Self::NAME, "closeTab", sink),
        }
    }

    /// Focuses the tab with `tab.id` if it is already open, otherwise appends it
    /// and makes it active. Never produces two tabs with the same id.
    pub fn open(&self, tab: EditorTab) {
        let mut state = self.state.borrow_mut();
        let id = tab.id.clone();
        if state.position(&id).is_none() {
            tracing::debug!(id = %id, name = %tab.name, "editor tab opened");
            state.tabs.push(tab);
        }
        state.current = Some(id);
    }

    /// Installs the entry view shown when no tab is open; replaces any previous one.
    pub fn set_entry(&self, render: Render) {
        *self.entry.borrow_mut() = Some(render);
    }

    pub fn entry(&self) -> Option<Render> {
        self.entry.borrow().clone()
    }

    pub fn render_entry(&self) -> Option<Element> {
        let render = self.entry()?;
        Some(render())
    }

    pub fn tabs(&self) -> Vec<EditorTab> {
        self.state.borrow().tabs.clone()
    }

    pub fn tab(&self, id: &str) -> Option<EditorTab> {
        let state = self.state.borrow();
        state.position(id).map(|pos| state.tabs[pos].clone())
    }

    pub fn active(&self) -> Option<EditorTab> {
        let current = self.state.borrow().current.clone()?;
        self.tab(&current)
    }

    pub fn get_state(&self) -> EditorState {
        self.state.borrow().clone()
    }

    pub fn change_tab<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&EditorTab) -> HandlerResult + 'static,
    {
        self.on_change_tab.subscribe(handler)
    }

    pub fn select_tab<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&EditorTab) -> HandlerResult + 'static,
    {
        self.on_select_tab.subscribe(handler)
    }

    pub fn on_close_tab<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&EditorTab) -> HandlerResult + 'static,
    {
        self.on_close_tab.subscribe(handler)
    }

    /// Host trigger: the user clicked the tab `id`.
    pub fn select(&self, id: &str) -> Result<(), StateError> {
        let tab = {
            let mut state = self.state.borrow_mut();
            let pos = state
                .position(id)
                .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
            state.current = Some(id.to_string());
            state.tabs[pos].clone()
        };
        self.on_select_tab.emit(&tab);
        Ok(())
    }

    /// Host trigger: the content of tab `id` was edited.
    pub fn update_content(&self, id: &str, value: impl Into<String>) -> Result<(), StateError> {
        let tab = {
            let mut state = self.state.borrow_mut();
            let pos = state
                .position(id)
                .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
            let tab = &mut state.tabs[pos];
            tab.data.value = value.into();
            tab.modified = true;
            tab.clone()
        };
        self.on_change_tab.emit(&tab);
        Ok(())
    }

    /// Host trigger: close tab `id`. If it was active, the tab now at its position
    /// (or the last tab) becomes active.
    pub fn close(&self, id: &str) -> Result<(), StateError> {
        let tab = {
            let mut state = self.state.borrow_mut();
            let pos = state
                .position(id)
                .ok_or_else(|| StateError::not_found(Self::NAME, id))?;
            let tab = state.tabs.remove(pos);
            if state.current.as_deref() == Some(id) {
                let next = pos.min(state.tabs.len().saturating_sub(1));
                state.current = state.tabs.get(next).map(|t| t.id.clone());
            }
            tab
        };
        tracing::debug!(id, "editor tab closed");
        self.on_close_tab.emit(&tab);
        Ok(())
    }
}

impl Service for EditorService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for EditorService {
    const NAME: &'static str = "editor";
}

#[cfg(test)]
#[path = "../../tests/unit/services/editor.rs"]
mod tests;
