//! Extension activation protocol.
//!
//! An [`Extension`] is activated once with an [`ExtensionContext`] giving it the
//! shell's services. Everything it registers during activation stays registered;
//! subscriptions it hands to [`ExtensionContext::track`] are disposed again on
//! deactivation.

pub mod context;
pub mod error;
pub mod host;
pub mod manifest;

pub use context::{ExtensionContext, Services};
pub use error::ExtensionError;
pub use host::{ExtensionHost, ExtensionState};
pub use manifest::{ExtensionManifest, ExtensionsConfig};

pub trait Extension {
    fn id(&self) -> &str;

    fn activate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError>;

    fn deactivate(&self, _ctx: &ExtensionContext) {}
}
