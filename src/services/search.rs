use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Disposable, ErrorSink, EventBus, HandlerResult, NamedService, Service};
use crate::models::{SearchResult, ValidateInfo};

use super::error::StateError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub value: String,
    pub result: Vec<SearchResult>,
    pub validate_info: Option<ValidateInfo>,
}

/// Search pane service. Results are produced by extensions: the host only stores
/// what `set_result` / `set_validate_info` hand it, whenever they are called.
pub struct SearchService {
    state: RefCell<SearchState>,
    on_search: EventBus<str>,
    on_result_click: EventBus<SearchResult>,
}

impl SearchService {
    pub fn new(sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            state: RefCell::new(SearchState::default()),
            on_search: EventBus::new(Self::NAME, "search", Rc::clone(&sink)),
            on_result_click: EventBus::new(Self::NAME, "resultClick", sink),
        }
    }

    pub fn on_search<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&str) -> HandlerResult + 'static,
    {
        self.on_search.subscribe(handler)
    }

    pub fn on_result_click<F>(&self, handler: F) -> Disposable
    where
        F: Fn(&SearchResult) -> HandlerResult + 'static,
    {
        self.on_result_click.subscribe(handler)
    }

    /// Replaces the displayed result forest.
    pub fn set_result(&self, result: Vec<SearchResult>) {
        self.state.borrow_mut().result = result;
    }

    /// Replaces the advisory banner; `None` clears it.
    pub fn set_validate_info(&self, info: Option<ValidateInfo>) {
        self.state.borrow_mut().validate_info = info;
    }

    pub fn result(&self) -> Vec<SearchResult> {
        self.state.borrow().result.clone()
    }

    pub fn validate_info(&self) -> Option<ValidateInfo> {
        self.state.borrow().validate_info.clone()
    }

    pub fn get_state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Host trigger: the user submitted `query`.
    pub fn submit(&self, query: &str) {
        self.state.borrow_mut().value = query.to_string();
        tracing::debug!(query, "search submitted");
        self.on_search.emit(query);
    }

    /// Host trigger: the user clicked the result `key`.
    pub fn click_result(&self, key: &str) -> Result<(), StateError> {
        let item = self
            .state
            .borrow()
            .result
            .iter()
            .find_map(|r| r.find(key))
            .cloned()
            .ok_or_else(|| StateError::not_found(Self::NAME, key))?;
        self.on_result_click.emit(&item);
        Ok(())
    }
}

impl Service for SearchService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for SearchService {
    const NAME: &'static str = "search";
}

#[cfg(test)]
#[path = "../../tests/unit/services/search.rs"]
mod tests;
