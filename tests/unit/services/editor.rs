use super::*;
use crate::core::TracingErrorSink;
use crate::models::{render_fn, TabData};

fn service() -> EditorService {
    EditorService::new(Rc::new(TracingErrorSink))
}

fn tab(id: &str, value: &str) -> EditorTab {
    EditorTab::new(id, format!("{id}.ts")).with_data(TabData {
        value: value.to_string(),
        language: "typescript".to_string(),
        path: None,
    })
}

#[test]
fn test_open_same_id_twice_keeps_one_tab() {
    let editor = service();
    editor.open(tab("a", "first"));
    editor.open(tab("b", ""));
    editor.open(tab("a", "second"));

    let tabs = editor.tabs();
    assert_eq!(tabs.iter().filter(|t| t.id == "a").count(), 1);
    assert_eq!(tabs.len(), 2);
    assert_eq!(editor.get_state().current.as_deref(), Some("a"));
    assert_eq!(editor.tab("a").unwrap().data.value, "first");
}

#[test]
fn test_open_appends_and_activates() {
    let editor = service();
    editor.open(tab("a", ""));
    editor.open(tab("b", ""));
    assert_eq!(editor.active().unwrap().id, "b");
    let ids: Vec<String> = editor.tabs().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_set_entry_last_call_wins() {
    let editor = service();
    assert!(editor.render_entry().is_none());

    editor.set_entry(render_fn(|| Element::new("Welcome")));
    editor.set_entry(render_fn(|| Element::new("Entry")));

    assert_eq!(editor.render_entry().unwrap().component, "Entry");
}

#[test]
fn test_change_and_select_events() {
    let editor = service();
    editor.open(tab("a", ""));
    editor.open(tab("b", ""));

    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let log = Rc::clone(&log);
        let _ = editor.change_tab(move |t| {
            log.borrow_mut().push(format!("change:{}:{}", t.id, t.data.value));
            Ok(())
        });
    }
    {
        let log = Rc::clone(&log);
        let _ = editor.select_tab(move |t| {
            log.borrow_mut().push(format!("select:{}", t.id));
            Ok(())
        });
    }

    editor.update_content("a", "hello").unwrap();
    editor.select("a").unwrap();

    assert_eq!(*log.borrow(), vec!["change:a:hello", "select:a"]);
    assert!(editor.tab("a").unwrap().modified);
    assert_eq!(editor.active().unwrap().id, "a");
    assert!(editor.select("zzz").is_err());
    assert!(editor.update_content("zzz", "x").is_err());
}

#[test]
fn test_close_activates_neighbour() {
    let editor = service();
    editor.open(tab("a", ""));
    editor.open(tab("b", ""));
    editor.open(tab("c", ""));
    editor.select("b").unwrap();

    let closed = Rc::new(RefCell::new(None));
    {
        let closed = Rc::clone(&closed);
        let _ = editor.on_close_tab(move |t| {
            *closed.borrow_mut() = Some(t.id.clone());
            Ok(())
        });
    }

    editor.close("b").unwrap();
    assert_eq!(closed.borrow().as_deref(), Some("b"));
    assert_eq!(editor.active().unwrap().id, "c");

    editor.close("c").unwrap();
    assert_eq!(editor.active().unwrap().id, "a");

    editor.close("a").unwrap();
    assert!(editor.active().is_none());
    assert!(editor.close("a").is_err());
}
