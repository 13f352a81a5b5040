//! Board and date grouping.
//!
//! # Responsibility
//! - Fan items out under every board they list.
//! - Partition items by creation date.
//! - Discover referenced boards and dates in first-seen order.

use crate::model::item::{Item, ItemMap, DEFAULT_BOARD};

/// Ordered mapping from group label to the items under it.
pub type GroupedItems = Vec<(String, Vec<Item>)>;

/// Every board referenced by `data`, sentinel first, then first-seen order
/// over ascending ids.
pub fn list_boards(data: &ItemMap) -> Vec<String> {
    let mut boards = vec![DEFAULT_BOARD.to_string()];
    for item in data.values() {
        for board in &item.boards {
            if !boards.contains(board) {
                boards.push(board.clone());
            }
        }
    }
    boards
}

/// Every creation date referenced by `data`, first-seen order.
pub fn list_dates(data: &ItemMap) -> Vec<String> {
    let mut dates: Vec<String> = Vec::new();
    for item in data.values() {
        if !dates.contains(&item.date) {
            dates.push(item.date.clone());
        }
    }
    dates
}

/// Groups items under each board whose label they carry.
///
/// This is a covering, not a partition: an item on several boards appears
/// once per board. Boards with no items are omitted. An empty `boards`
/// slice falls back to discovery over `data`.
pub fn group_by_board(data: &ItemMap, boards: &[String]) -> GroupedItems {
    let discovered;
    let boards = if boards.is_empty() {
        discovered = list_boards(data);
        &discovered
    } else {
        boards
    };

    let mut grouped = GroupedItems::new();
    for board in boards {
        let items: Vec<Item> = data
            .values()
            .filter(|item| item.boards.contains(board))
            .cloned()
            .collect();
        if !items.is_empty() {
            grouped.push((board.clone(), items));
        }
    }
    grouped
}

/// Groups items by creation date — a strict partition, since every item has
/// exactly one date. An empty `dates` slice falls back to discovery.
pub fn group_by_date(data: &ItemMap, dates: &[String]) -> GroupedItems {
    let discovered;
    let dates = if dates.is_empty() {
        discovered = list_dates(data);
        &discovered
    } else {
        dates
    };

    let mut grouped = GroupedItems::new();
    for date in dates {
        let items: Vec<Item> = data
            .values()
            .filter(|item| item.date == *date)
            .cloned()
            .collect();
        if !items.is_empty() {
            grouped.push((date.clone(), items));
        }
    }
    grouped
}
