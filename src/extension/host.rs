use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::{panic_message, ServiceRegistry};
use crate::services::ports::LocalExecutor;

use super::context::{ExtensionContext, Services};
use super::error::ExtensionError;
use super::Extension;

/// Lifecycle of one registered extension.
///
/// `Unregistered` means its capabilities are not registered with the shell yet,
/// i.e. it has not been activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionState {
    Unregistered,
    Activating,
    Active,
    Failed,
    Deactivated,
}

struct Entry {
    extension: Rc<dyn Extension>,
    state: ExtensionState,
    context: Option<ExtensionContext>,
}

/// Activates extensions against one shell's services.
///
/// Each extension activates at most once. A failing or panicking activation
/// leaves whatever the extension registered before failing in place.
pub struct ExtensionHost {
    registry: Rc<ServiceRegistry>,
    services: Services,
    executor: Rc<dyn LocalExecutor>,
    entries: Vec<Entry>,
    index: FxHashMap<String, usize>,
}

impl ExtensionHost {
    pub fn new(
        registry: Rc<ServiceRegistry>,
        executor: Rc<dyn LocalExecutor>,
    ) -> Result<Self, ExtensionError> {
        let services = Services::resolve(&registry)?;
        Ok(Self {
            registry,
            services,
            executor,
            entries: Vec::new(),
            index: FxHashMap::default(),
        })
    }

    pub fn register(&mut self, extension: Rc<dyn Extension>) -> Result<(), ExtensionError> {
        let id = extension.id().to_string();
        if self.index.contains_key(&id) {
            return Err(ExtensionError::DuplicateExtension(id));
        }
        tracing::debug!(extension = %id, "extension registered");
        self.index.insert(id, self.entries.len());
        self.entries.push(Entry {
            extension,
            state: ExtensionState::Unregistered,
            context: None,
        });
        Ok(())
    }

    /// `None` for ids never registered.
    pub fn state(&self, id: &str) -> Option<ExtensionState> {
        self.index.get(id).map(|&i| self.entries[i].state)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.extension.id().to_string())
            .collect()
    }

    pub fn activate(&mut self, id: &str) -> Result<(), ExtensionError> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| ExtensionError::NotRegistered(id.to_string()))?;
        if self.entries[i].state != ExtensionState::Unregistered {
            return Err(ExtensionError::AlreadyActivated(id.to_string()));
        }

        let ctx = ExtensionContext::new(
            id,
            self.services.clone(),
            Rc::clone(&self.registry),
            Rc::clone(&self.executor),
        );
        let extension = Rc::clone(&self.entries[i].extension);
        self.entries[i].state = ExtensionState::Activating;
        self.entries[i].context = Some(ctx.clone());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| extension.activate(&ctx)))
            .unwrap_or_else(|payload| Err(ExtensionError::Panicked(panic_message(payload))));
        match outcome {
            Ok(()) => {
                self.entries[i].state = ExtensionState::Active;
                tracing::info!(extension = id, "extension activated");
                Ok(())
            }
            Err(e) => {
                self.entries[i].state = ExtensionState::Failed;
                let err = ExtensionError::ActivationFailure {
                    id: id.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!(extension = id, error = %e, "extension activation failed");
                Err(err)
            }
        }
    }

    /// Activates every not yet activated extension in registration order. One
    /// failure does not stop the rest; the failures are returned.
    pub fn activate_all(&mut self) -> Vec<ExtensionError> {
        let pending: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.state == ExtensionState::Unregistered)
            .map(|e| e.extension.id().to_string())
            .collect();
        pending
            .iter()
            .filter_map(|id| self.activate(id).err())
            .collect()
    }

    /// Deactivates an active extension and disposes its tracked subscriptions.
    /// Any other state is left as is.
    pub fn deactivate(&mut self, id: &str) -> Result<(), ExtensionError> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| ExtensionError::NotRegistered(id.to_string()))?;
        if self.entries[i].state != ExtensionState::Active {
            return Ok(());
        }
        let extension = Rc::clone(&self.entries[i].extension);
        if let Some(ctx) = self.entries[i].context.take() {
            extension.deactivate(&ctx);
            let disposed = ctx.dispose_subscriptions();
            tracing::info!(extension = id, disposed, "extension deactivated");
        }
        self.entries[i].state = ExtensionState::Deactivated;
        Ok(())
    }

    pub fn deactivate_all(&mut self) {
        for id in self.ids().iter().rev() {
            let _ = self.deactivate(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extension/host.rs"]
mod tests;
