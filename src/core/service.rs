use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    NotFound(String),
    AlreadyRegistered(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(name) => write!(f, "Service not found: {}", name),
            ServiceError::AlreadyRegistered(name) => {
                write!(f, "Service already registered: {}", name)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

/// A host service addressable by a fixed name.
pub trait Service: Any {
    fn name(&self) -> &'static str;
}

/// Services with a well-known name, resolvable by type.
pub trait NamedService: Service + Sized {
    const NAME: &'static str;
}

struct Entry {
    service: Rc<dyn Service>,
    any: Rc<dyn Any>,
}

/// Per-shell table of named services.
///
/// Every service is registered once by the host before extensions activate and
/// lives as long as the registry; there is no removal.
pub struct ServiceRegistry {
    services: FxHashMap<&'static str, Entry>,
    order: Vec<&'static str>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn register<S: Service>(&mut self, service: Rc<S>) -> Result<()> {
        let name = service.name();
        if self.services.contains_key(name) {
            return Err(ServiceError::AlreadyRegistered(name.to_string()));
        }
        let any: Rc<dyn Any> = service.clone();
        self.services.insert(name, Entry { service, any });
        self.order.push(name);
        tracing::debug!(service = name, "service registered");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Rc<dyn Service>> {
        self.services
            .get(name)
            .map(|entry| Rc::clone(&entry.service))
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }

    pub fn resolve<S: NamedService>(&self) -> Result<Rc<S>> {
        self.services
            .get(S::NAME)
            .and_then(|entry| Rc::clone(&entry.any).downcast::<S>().ok())
            .ok_or_else(|| ServiceError::NotFound(S::NAME.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn names(&self) -> &[&'static str] {
        &self.order
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/service.rs"]
mod tests;
