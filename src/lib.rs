//! workbench-host: a headless host for an IDE-style shell.
//!
//! Modules:
//! - core: service registry and event buses
//! - models: data shared between services and extensions
//! - services: the host services, their ports and adapters
//! - extension: the activation protocol
//! - extensions: built-in extensions
//! - workbench: one shell instance wiring all of the above

pub mod core;
pub mod extension;
pub mod extensions;
pub mod models;
pub mod services;
pub mod workbench;

pub use workbench::{Workbench, WorkbenchSnapshot};
