use super::*;
use crate::core::TracingErrorSink;
use crate::models::render_fn;
use std::cell::Cell;

fn service() -> SidebarService {
    SidebarService::new(Rc::new(TracingErrorSink))
}

#[test]
fn test_update_state_sets_current_without_touching_hidden() {
    let sidebar = service();
    sidebar.update_state(SelectionStatePatch {
        hidden: Some(true),
        ..Default::default()
    });
    sidebar.update_state(SelectionStatePatch {
        current: Some("searchPane".to_string()),
        ..Default::default()
    });

    let state = sidebar.get_state();
    assert_eq!(state.current.as_deref(), Some("searchPane"));
    assert!(state.hidden);
}

#[test]
fn test_render_current_invokes_pane_render() {
    let sidebar = service();
    let renders = Rc::new(Cell::new(0));
    {
        let renders = Rc::clone(&renders);
        sidebar
            .add(
                SidebarPane::new("test", "TEST").with_render(render_fn(move || {
                    renders.set(renders.get() + 1);
                    Element::new("TestPane")
                })),
            )
            .unwrap();
    }

    assert_eq!(sidebar.render_current(), None);
    sidebar.select("test").unwrap();
    assert_eq!(
        sidebar.render_current().map(|e| e.component),
        Some("TestPane".to_string())
    );
    assert_eq!(renders.get(), 1);
}

#[test]
fn test_render_current_for_unregistered_current() {
    let sidebar = service();
    sidebar.update_state(SelectionStatePatch {
        current: Some("ghost".to_string()),
        ..Default::default()
    });
    assert_eq!(sidebar.render_current(), None);
}

#[test]
fn test_duplicate_pane_rejected() {
    let sidebar = service();
    sidebar.push(SidebarPane::new("a", "A")).unwrap();
    assert!(matches!(
        sidebar.push(SidebarPane::new("a", "Other")),
        Err(StateError::DuplicateId { .. })
    ));
    assert_eq!(sidebar.panes().len(), 1);
    assert_eq!(sidebar.get("a").unwrap().title, "A");
}

#[test]
fn test_update_title() {
    let sidebar = service();
    sidebar.add(SidebarPane::new("a", "A")).unwrap();
    sidebar
        .update(
            "a",
            SidebarPanePatch {
                title: Some("ALPHA".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(sidebar.get("a").unwrap().title, "ALPHA");
    assert!(sidebar.update("b", SidebarPanePatch::default()).is_err());
}

#[test]
fn test_select_fires_with_pane() {
    let sidebar = service();
    sidebar.add(SidebarPane::new("a", "A")).unwrap();
    let seen = Rc::new(RefCell::new(None));
    {
        let seen = Rc::clone(&seen);
        let _ = sidebar.on_select(move |pane| {
            *seen.borrow_mut() = Some(pane.id.clone());
            Ok(())
        });
    }
    sidebar.select("a").unwrap();
    assert_eq!(seen.borrow().as_deref(), Some("a"));
    assert!(sidebar.select("b").is_err());
}
