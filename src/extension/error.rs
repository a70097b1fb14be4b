use std::fmt;

use crate::core::{HandlerError, ServiceError};
use crate::services::{SettingsError, StateError};

#[derive(Debug)]
pub enum ExtensionError {
    /// `activate` returned an error; the extension is left `Failed`.
    ActivationFailure { id: String, message: String },
    AlreadyActivated(String),
    DuplicateExtension(String),
    NotRegistered(String),
    /// `activate` panicked; carries the panic message.
    Panicked(String),
    Handler(HandlerError),
    Service(ServiceError),
    State(StateError),
    Settings(SettingsError),
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::ActivationFailure { id, message } => {
                write!(f, "extension {} failed to activate: {}", id, message)
            }
            ExtensionError::AlreadyActivated(id) => {
                write!(f, "extension already activated: {}", id)
            }
            ExtensionError::DuplicateExtension(id) => {
                write!(f, "extension already registered: {}", id)
            }
            ExtensionError::NotRegistered(id) => write!(f, "extension not registered: {}", id),
            ExtensionError::Panicked(message) => write!(f, "activate panicked: {}", message),
            ExtensionError::Handler(e) => write!(f, "{}", e),
            ExtensionError::Service(e) => write!(f, "{}", e),
            ExtensionError::State(e) => write!(f, "{}", e),
            ExtensionError::Settings(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExtensionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtensionError::Service(e) => Some(e),
            ExtensionError::State(e) => Some(e),
            ExtensionError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HandlerError> for ExtensionError {
    fn from(e: HandlerError) -> Self {
        ExtensionError::Handler(e)
    }
}

impl From<ServiceError> for ExtensionError {
    fn from(e: ServiceError) -> Self {
        ExtensionError::Service(e)
    }
}

impl From<StateError> for ExtensionError {
    fn from(e: StateError) -> Self {
        ExtensionError::State(e)
    }
}

impl From<SettingsError> for ExtensionError {
    fn from(e: SettingsError) -> Self {
        ExtensionError::Settings(e)
    }
}
