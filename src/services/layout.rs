use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};
use crate::models::{LayoutState, Position};

/// Visibility and placement of the workbench regions.
pub struct LayoutService {
    state: RefCell<LayoutState>,
    on_change: EventBus<LayoutState>,
}

impl LayoutService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            state: RefCell::new(LayoutState::default()),
            on_change: EventBus::new(Self::NAME, "change", sink),
        }
    }

    pub fn get_state(&self) -> LayoutState {
        *self.state.borrow()
    }

    /// Replaces the whole layout. Last writer wins.
    pub fn set_state(&self, state: LayoutState) {
        *self.state.borrow_mut() = state;
        self.changed();
    }

    /// Mutates the current layout in place, so concurrent edits to other regions
    /// are kept.
    pub fn update_state(&self, f: impl FnOnce(&mut LayoutState)) {
        f(&mut *self.state.borrow_mut());
        self.changed();
    }

    pub fn set_side_bar_position(&self, position: Position) {
        self.update_state(|state| state.side_bar.position = position);
    }

    pub fn on_change<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&LayoutState) -> HandlerResult + 'static,
    {
        self.on_change.subscribe(handler)
    }

    fn changed(&self) {
        let state = self.get_state();
        tracing::debug!(?state, "layout changed");
        self.on_change.emit(&state);
    }
}

impl Service for LayoutService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for LayoutService {
    const NAME: &'static str = "layout";
}

#[cfg(test)]
#[path = "../../tests/unit/services/layout.rs"]
mod tests;
