use tallybook_core::{
    collect_stats, filter_by_attributes, group_by_board, group_by_date, list_boards, list_dates,
    AttributeFilter, Category, Item, ItemKind, ItemMap, Priority, DEFAULT_BOARD,
};

fn task(id: u32, description: &str, boards: &[&str]) -> Item {
    Item::task(
        id,
        description,
        boards.iter().map(|b| b.to_string()).collect(),
        Priority::default(),
        None,
    )
}

fn note(id: u32, description: &str, boards: &[&str]) -> Item {
    Item::note(
        id,
        description,
        boards.iter().map(|b| b.to_string()).collect(),
        None,
    )
}

fn complete(mut item: Item) -> Item {
    if let ItemKind::Task { is_complete, .. } = &mut item.kind {
        *is_complete = true;
    }
    item
}

fn starred(mut item: Item) -> Item {
    item.is_starred = true;
    item
}

fn map(items: Vec<Item>) -> ItemMap {
    items.into_iter().map(|item| (item.id, item)).collect()
}

fn keywords(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|k| k.to_string()).collect()
}

fn sample() -> ItemMap {
    map(vec![
        task(1, "pending task", &["@work"]),
        complete(task(2, "done task", &["@work"])),
        starred(task(3, "starred pending", &["@home"])),
        note(4, "a note", &["@work"]),
    ])
}

#[test]
fn every_synonym_resolves_to_its_class() {
    for token in ["star", "starred"] {
        assert_eq!(AttributeFilter::parse(token), Some(AttributeFilter::Starred));
    }
    for token in ["done", "checked", "complete"] {
        assert_eq!(
            AttributeFilter::parse(token),
            Some(AttributeFilter::Complete)
        );
    }
    for token in ["pending", "unchecked", "incomplete"] {
        assert_eq!(AttributeFilter::parse(token), Some(AttributeFilter::Pending));
    }
    for token in ["todo", "task", "tasks"] {
        assert_eq!(AttributeFilter::parse(token), Some(AttributeFilter::Task));
    }
    for token in ["note", "notes"] {
        assert_eq!(AttributeFilter::parse(token), Some(AttributeFilter::Note));
    }
    assert_eq!(AttributeFilter::parse("everything"), None);
}

#[test]
fn keywords_narrow_by_intersection() {
    let data = sample();

    let tasks = filter_by_attributes(&keywords(&["task"]), &data, |_| true);
    assert_eq!(tasks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    let pending_tasks = filter_by_attributes(&keywords(&["task", "pending"]), &data, |_| true);
    assert_eq!(pending_tasks.keys().copied().collect::<Vec<_>>(), vec![1, 3]);

    // narrowing is monotonic: the narrowed set is a subset of the wider one
    assert!(pending_tasks.keys().all(|id| tasks.contains_key(id)));
}

#[test]
fn unrecognized_keywords_are_noops() {
    let data = sample();
    let out = filter_by_attributes(&keywords(&["everything", "bogus"]), &data, |_| true);
    assert_eq!(out, data);
}

#[test]
fn empty_collection_short_circuits() {
    let out = filter_by_attributes(&keywords(&["task"]), &ItemMap::new(), |_| true);
    assert!(out.is_empty());
}

#[test]
fn extra_predicate_is_anded_into_each_class() {
    let data = sample();
    let out = filter_by_attributes(&keywords(&["task"]), &data, |item| {
        item.boards.contains(&"@work".to_string())
    });
    assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn starred_filter_spans_tasks_and_notes() {
    let data = map(vec![
        starred(task(1, "t", &["@work"])),
        starred(note(2, "n", &["@work"])),
        task(3, "plain", &["@work"]),
    ]);
    let out = filter_by_attributes(&keywords(&["starred"]), &data, |_| true);
    assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn board_grouping_is_a_covering() {
    let data = map(vec![
        task(1, "two boards", &["@work", "@home"]),
        task(2, "one board", &["@home"]),
    ]);
    let grouped = group_by_board(&data, &[]);

    let labels: Vec<&str> = grouped.iter().map(|(board, _)| board.as_str()).collect();
    assert_eq!(labels, vec!["@work", "@home"]);

    // item 1 fans out under both of its boards
    let appearances: usize = grouped
        .iter()
        .map(|(_, items)| items.iter().filter(|item| item.id == 1).count())
        .sum();
    assert_eq!(appearances, 2);
}

#[test]
fn date_grouping_is_a_partition() {
    let data = sample();
    let grouped = group_by_date(&data, &[]);

    let total: usize = grouped.iter().map(|(_, items)| items.len()).sum();
    assert_eq!(total, data.len());

    for (_, items) in &grouped {
        for item in items {
            let memberships = grouped
                .iter()
                .filter(|(date, _)| *date == item.date)
                .count();
            assert_eq!(memberships, 1);
        }
    }
}

#[test]
fn board_discovery_puts_the_sentinel_first() {
    let data = map(vec![
        task(1, "tagged", &["@work"]),
        task(2, "untagged", &[]),
    ]);
    let boards = list_boards(&data);
    assert_eq!(boards, vec![DEFAULT_BOARD, "@work"]);

    // the sentinel leads even when nothing uses it
    let only_tagged = map(vec![task(1, "tagged", &["@work"])]);
    assert_eq!(list_boards(&only_tagged)[0], DEFAULT_BOARD);
}

#[test]
fn date_discovery_walks_in_id_order() {
    let data = sample();
    let dates = list_dates(&data);
    // all sample items are created "now", so discovery collapses to one day
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0], data[&1].date);
}

#[test]
fn stats_tally_tasks_and_categories() {
    let mut data = sample();
    data.insert(
        5,
        Item::note(
            5,
            "colored",
            Vec::new(),
            Some(Category {
                name: "coding".to_string(),
                color: Some("#ff0000".to_string()),
            }),
        ),
    );

    let stats = collect_stats(&data);
    assert_eq!(stats.complete, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.notes, 2);
    assert_eq!(stats.percent, 33);

    assert_eq!(stats.categories.len(), 2);
    assert_eq!(stats.categories[0].name, "notes");
    assert_eq!(stats.categories[0].count, 1);
    assert_eq!(stats.categories[1].name, "coding");
    assert_eq!(stats.categories[1].color.as_deref(), Some("#ff0000"));
}

#[test]
fn stats_on_an_empty_collection_are_zero() {
    let stats = collect_stats(&ItemMap::new());
    assert_eq!(stats.percent, 0);
    assert_eq!(stats.complete, 0);
    assert_eq!(stats.pending, 0);
    assert!(stats.categories.is_empty());
}
