use tallybook_core::{Category, Item, ItemKind, Priority, DEFAULT_BOARD, DEFAULT_CATEGORY};

#[test]
fn task_construction_applies_defaults() {
    let item = Item::task(1, "pay rent", Vec::new(), Priority::default(), None);

    assert_eq!(item.id, 1);
    assert!(item.is_task());
    assert!(!item.is_complete());
    assert!(!item.is_starred);
    assert_eq!(item.boards, vec![DEFAULT_BOARD]);
    assert_eq!(item.priority(), Some(Priority::Normal));
    assert_eq!(item.due_date(), None);
    assert!(!item.date.is_empty());
}

#[test]
fn note_without_category_gets_the_notes_default() {
    let item = Item::note(1, "call plumber", Vec::new(), None);

    assert!(!item.is_task());
    let category = item.category().unwrap();
    assert_eq!(category.name, DEFAULT_CATEGORY);
    assert_eq!(category.color, None);
}

#[test]
fn note_keeps_an_explicit_category() {
    let category = Category {
        name: "coding".to_string(),
        color: Some("#ff0000".to_string()),
    };
    let item = Item::note(2, "rust tips", Vec::new(), Some(category.clone()));
    assert_eq!(item.category(), Some(&category));
}

#[test]
fn boards_are_deduplicated_at_construction() {
    let boards = vec![
        "@work".to_string(),
        "@home".to_string(),
        "@work".to_string(),
    ];
    let item = Item::task(1, "overlap", boards, Priority::default(), None);
    assert_eq!(item.boards, vec!["@work", "@home"]);
}

#[test]
fn serde_roundtrip_preserves_the_kind_tag() {
    let task = Item::task(
        3,
        "ship release",
        vec!["@work".to_string()],
        Priority::High,
        Some("12/25/25".to_string()),
    );
    let json = serde_json::to_string(&task).unwrap();
    assert!(json.contains("\"kind\":\"task\""));
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, task);

    let note = Item::note(4, "idea", Vec::new(), None);
    let json = serde_json::to_string(&note).unwrap();
    assert!(json.contains("\"kind\":\"note\""));
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, note);
}

#[test]
fn kind_discriminator_matches_variant() {
    let task = Item::task(1, "t", Vec::new(), Priority::default(), None);
    assert!(matches!(task.kind, ItemKind::Task { .. }));

    let note = Item::note(2, "n", Vec::new(), None);
    assert!(matches!(note.kind, ItemKind::Note { .. }));
}
