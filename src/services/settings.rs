//! Settings service: configuration access plus the asynchronous change event.

use serde_json::Value;
use std::future::Future;
use std::rc::Rc;

use crate::core::{AsyncEventBus, Disposable, ErrorSink, HandlerResult, NamedService, Service};

use super::error::SettingsError;
use super::ports::ConfigurationStore;

pub struct SettingsService {
    store: Rc<dyn ConfigurationStore>,
    on_change_configuration: AsyncEventBus<Value>,
}

impl SettingsService {
    pub fn new(store: Rc<dyn ConfigurationStore>, sink: Rc<dyn ErrorSink>) -> Self {
        Self {
            store,
            on_change_configuration: AsyncEventBus::new(Self::NAME, "changeConfiguration", sink),
        }
    }

    pub fn on_change_configuration<F, Fut>(&self, handler: F) -> Disposable
    where
        F: Fn(Value) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        self.on_change_configuration.subscribe(handler)
    }

    /// Host trigger: configuration `value` was proposed upstream. Resolves once
    /// every handler has finished, one after another.
    pub async fn change_configuration(&self, value: Value) -> usize {
        tracing::debug!("configuration change proposed");
        self.on_change_configuration.emit(value).await
    }

    /// Merges `value` into the stored configuration. Durable on return.
    pub fn update(&self, value: &Value) -> Result<(), SettingsError> {
        self.store.write(value)
    }

    pub async fn get_configuration(&self) -> Result<Value, SettingsError> {
        self.store.read().await
    }
}

impl Service for SettingsService {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl NamedService for SettingsService {
    const NAME: &'static str = "settings";
}

#[cfg(test)]
#[path = "../../tests/unit/services/settings.rs"]
mod tests;
