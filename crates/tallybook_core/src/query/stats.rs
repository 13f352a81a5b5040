//! Display statistics.
//!
//! # Responsibility
//! - Tally task completion and note categories for the stats display.
//!   The presenter formats; this module only counts.

use crate::model::item::{ItemKind, ItemMap};

/// Per-category note tally carrying the shared category color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTally {
    pub name: String,
    pub color: Option<String>,
    pub count: usize,
}

/// Aggregate counts over the active collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Completed share of all tasks, floored percent; 0 when no tasks exist.
    pub percent: u8,
    pub complete: usize,
    pub pending: usize,
    pub notes: usize,
    /// Note tallies in first-seen category order.
    pub categories: Vec<CategoryTally>,
}

/// Computes stats over one collection.
pub fn collect_stats(data: &ItemMap) -> Stats {
    let mut complete = 0;
    let mut pending = 0;
    let mut notes = 0;
    let mut categories: Vec<CategoryTally> = Vec::new();

    for item in data.values() {
        match &item.kind {
            ItemKind::Task { is_complete, .. } => {
                if *is_complete {
                    complete += 1;
                } else {
                    pending += 1;
                }
            }
            ItemKind::Note { category } => {
                notes += 1;
                match categories.iter_mut().find(|tally| tally.name == category.name) {
                    Some(tally) => tally.count += 1,
                    None => categories.push(CategoryTally {
                        name: category.name.clone(),
                        color: category.color.clone(),
                        count: 1,
                    }),
                }
            }
        }
    }

    let total = complete + pending;
    let percent = if total == 0 {
        0
    } else {
        (complete * 100 / total) as u8
    };

    Stats {
        percent,
        complete,
        pending,
        notes,
        categories,
    }
}
