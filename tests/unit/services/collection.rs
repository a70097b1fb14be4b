use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    id: String,
    label: String,
}

struct EntryPatch {
    label: Option<String>,
}

impl Item for Entry {
    type Patch = EntryPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: EntryPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
    }
}

fn entry(id: &str) -> Entry {
    Entry {
        id: id.to_string(),
        label: id.to_uppercase(),
    }
}

#[test]
fn test_add_preserves_insertion_order() {
    let mut items = ItemCollection::new("activityBar");
    for id in ["explorer", "search", "git", "debug"] {
        items.add(entry(id)).unwrap();
    }

    let ids: Vec<String> = items.items().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["explorer", "search", "git", "debug"]);
    assert_eq!(items.len(), 4);
}

#[test]
fn test_add_duplicate_is_rejected() {
    let mut items = ItemCollection::new("activityBar");
    items.add(entry("search")).unwrap();

    let err = items.add(entry("search")).unwrap_err();
    assert_eq!(err, StateError::duplicate("activityBar", "search"));
    assert_eq!(items.len(), 1);
}

#[test]
fn test_add_returns_the_stored_rc() {
    let mut items = ItemCollection::new("sidebar");
    let stored = items.add(entry("a")).unwrap();
    assert!(Rc::ptr_eq(&stored, &items.get("a").unwrap()));
}

#[test]
fn test_update_merges_patch() {
    let mut items = ItemCollection::new("sidebar");
    items.add(entry("a")).unwrap();
    items
        .update(
            "a",
            EntryPatch {
                label: Some("Alpha".to_string()),
            },
        )
        .unwrap();
    assert_eq!(items.get("a").unwrap().label, "Alpha");
}

#[test]
fn test_update_missing_never_creates() {
    let mut items = ItemCollection::new("sidebar");
    items.add(entry("a")).unwrap();

    let err = items
        .update(
            "b",
            EntryPatch {
                label: Some("B".to_string()),
            },
        )
        .unwrap_err();
    assert!(matches!(err, StateError::NotFound { .. }));
    assert_eq!(items.len(), 1);
    assert!(items.get("b").is_none());
}

#[test]
fn test_update_does_not_mutate_handed_out_rc() {
    let mut items = ItemCollection::new("sidebar");
    let before = items.add(entry("a")).unwrap();
    items
        .update(
            "a",
            EntryPatch {
                label: Some("new".to_string()),
            },
        )
        .unwrap();
    assert_eq!(before.label, "A");
    assert_eq!(items.get("a").unwrap().label, "new");
}

#[test]
fn test_remove() {
    let mut items = ItemCollection::new("sidebar");
    items.add(entry("a")).unwrap();
    items.add(entry("b")).unwrap();

    assert_eq!(items.remove("a").unwrap().id, "a");
    assert!(items.remove("a").is_err());
    assert_eq!(items.len(), 1);
}

#[test]
fn test_selection_state_merge_is_shallow() {
    let mut state = SelectionState {
        current: Some("explorer".to_string()),
        hidden: true,
    };
    state.merge(SelectionStatePatch {
        current: Some("search".to_string()),
        ..Default::default()
    });
    assert_eq!(state.current.as_deref(), Some("search"));
    assert!(state.hidden);

    state.merge(SelectionStatePatch {
        hidden: Some(false),
        ..Default::default()
    });
    assert_eq!(state.current.as_deref(), Some("search"));
    assert!(!state.hidden);
}
