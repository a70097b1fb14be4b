use super::*;
use std::cell::Cell;

use crate::core::TracingErrorSink;
use crate::services::adapters::{InMemoryConfigurationStore, TokioLocalExecutor};
use crate::services::{ActivityBarItem, SelectionStatePatch, SidebarPane, StateError};
use crate::workbench::build_registry;

fn host() -> ExtensionHost {
    let registry = build_registry(
        Rc::new(InMemoryConfigurationStore::new()),
        Rc::new(TracingErrorSink),
    )
    .unwrap();
    ExtensionHost::new(Rc::new(registry), Rc::new(TokioLocalExecutor::new())).unwrap()
}

/// Registers an activity item and a pane sharing `id`; selecting the item shows
/// the pane. With `fail` set it errors after the activity item is in.
struct PaneExtension {
    id: &'static str,
    fail: bool,
    activations: Rc<Cell<u32>>,
    deactivations: Rc<Cell<u32>>,
}

impl PaneExtension {
    fn new(id: &'static str) -> Self {
        Self {
            id,
            fail: false,
            activations: Rc::new(Cell::new(0)),
            deactivations: Rc::new(Cell::new(0)),
        }
    }

    fn failing(id: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(id)
        }
    }
}

impl Extension for PaneExtension {
    fn id(&self) -> &str {
        self.id
    }

    fn activate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        self.activations.set(self.activations.get() + 1);
        let services = ctx.services();
        services
            .activity_bar
            .add(ActivityBarItem::new(self.id, self.id))?;
        if self.fail {
            return Err(StateError::not_found("sidebar", "boom").into());
        }
        services.sidebar.add(SidebarPane::new(self.id, self.id))?;

        let sidebar = Rc::clone(&services.sidebar);
        let id = self.id;
        ctx.track(services.activity_bar.on_select(move |event| {
            if event.item.id == id {
                sidebar.update_state(SelectionStatePatch {
                    current: Some(id.to_string()),
                    hidden: None,
                });
            }
            Ok(())
        }));
        Ok(())
    }

    fn deactivate(&self, _ctx: &ExtensionContext) {
        self.deactivations.set(self.deactivations.get() + 1);
    }
}

#[test]
fn test_activate_then_select_shows_pane() {
    let mut host = host();
    host.register(Rc::new(PaneExtension::new("search"))).unwrap();
    assert_eq!(host.state("search"), Some(ExtensionState::Unregistered));

    host.activate("search").unwrap();
    assert_eq!(host.state("search"), Some(ExtensionState::Active));

    host.services.activity_bar.select("search").unwrap();
    assert_eq!(
        host.services.sidebar.get_state().current.as_deref(),
        Some("search")
    );
}

#[test]
fn test_activation_runs_once() {
    let mut host = host();
    let extension = PaneExtension::new("once");
    let activations = Rc::clone(&extension.activations);
    host.register(Rc::new(extension)).unwrap();

    host.activate("once").unwrap();
    let err = host.activate("once").unwrap_err();

    assert!(matches!(err, ExtensionError::AlreadyActivated(ref id) if id == "once"));
    assert_eq!(activations.get(), 1);
    assert!(host.activate_all().is_empty());
    assert_eq!(activations.get(), 1);
}

#[test]
fn test_duplicate_extension_rejected() {
    let mut host = host();
    host.register(Rc::new(PaneExtension::new("dup"))).unwrap();
    let err = host.register(Rc::new(PaneExtension::new("dup"))).unwrap_err();
    assert!(matches!(err, ExtensionError::DuplicateExtension(_)));
    assert_eq!(host.ids(), vec!["dup"]);
}

#[test]
fn test_failed_activation_keeps_partial_registrations() {
    let mut host = host();
    host.register(Rc::new(PaneExtension::failing("broken")))
        .unwrap();
    host.register(Rc::new(PaneExtension::new("fine"))).unwrap();

    let failures = host.activate_all();

    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        ExtensionError::ActivationFailure { id, .. } if id == "broken"
    ));
    assert_eq!(host.state("broken"), Some(ExtensionState::Failed));
    assert_eq!(host.state("fine"), Some(ExtensionState::Active));
    assert!(host.services.activity_bar.get("broken").is_some());
    assert!(host.services.sidebar.get("broken").is_none());
    assert!(host.activate("broken").is_err());
}

struct PanickingExtension;

impl Extension for PanickingExtension {
    fn id(&self) -> &str {
        "panicky"
    }

    fn activate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        ctx.services()
            .activity_bar
            .add(ActivityBarItem::new("panicky", "panicky"))?;
        panic!("activation exploded");
    }
}

#[test]
fn test_panicking_activation_marked_failed_and_rest_activate() {
    let mut host = host();
    host.register(Rc::new(PanickingExtension)).unwrap();
    host.register(Rc::new(PaneExtension::new("fine"))).unwrap();

    let failures = host.activate_all();

    assert_eq!(failures.len(), 1);
    match &failures[0] {
        ExtensionError::ActivationFailure { id, message } => {
            assert_eq!(id, "panicky");
            assert!(message.contains("activation exploded"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(host.state("panicky"), Some(ExtensionState::Failed));
    assert_eq!(host.state("fine"), Some(ExtensionState::Active));
    assert!(host.services.activity_bar.get("panicky").is_some());
    assert!(matches!(
        host.activate("panicky"),
        Err(ExtensionError::AlreadyActivated(_))
    ));
}

#[test]
fn test_deactivate_idempotent_and_disposes_subscriptions() {
    let mut host = host();
    let extension = PaneExtension::new("pane");
    let deactivations = Rc::clone(&extension.deactivations);
    host.register(Rc::new(extension)).unwrap();
    host.register(Rc::new(PaneExtension::new("idle"))).unwrap();

    host.deactivate("idle").unwrap();
    assert_eq!(host.state("idle"), Some(ExtensionState::Unregistered));

    host.activate("pane").unwrap();
    host.deactivate("pane").unwrap();
    host.deactivate("pane").unwrap();

    assert_eq!(deactivations.get(), 1);
    assert_eq!(host.state("pane"), Some(ExtensionState::Deactivated));

    host.services.activity_bar.select("pane").unwrap();
    assert_eq!(host.services.sidebar.get_state().current, None);

    assert!(matches!(
        host.deactivate("ghost"),
        Err(ExtensionError::NotRegistered(_))
    ));
}

#[test]
fn test_unknown_extension_state_is_none() {
    let mut host = host();
    assert_eq!(host.state("nope"), None);
    assert!(matches!(
        host.activate("nope"),
        Err(ExtensionError::NotRegistered(_))
    ));
}
