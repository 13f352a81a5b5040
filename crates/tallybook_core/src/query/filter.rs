//! Attribute-keyword filtering.
//!
//! # Responsibility
//! - Map keyword synonyms onto five exclusive filter classes.
//! - Narrow a collection by repeated intersection.
//!
//! # Invariants
//! - Unrecognized keywords are no-ops.
//! - The extra predicate is ANDed into every recognized class application,
//!   never evaluated on its own.

use crate::model::item::{Item, ItemMap};

/// Filter class selected by an attribute keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFilter {
    Starred,
    Complete,
    Pending,
    Task,
    Note,
}

impl AttributeFilter {
    /// Resolves a keyword through the fixed synonym table.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "star" | "starred" => Some(Self::Starred),
            "done" | "checked" | "complete" => Some(Self::Complete),
            "pending" | "unchecked" | "incomplete" => Some(Self::Pending),
            "todo" | "task" | "tasks" => Some(Self::Task),
            "note" | "notes" => Some(Self::Note),
            _ => None,
        }
    }

    fn matches(self, item: &Item) -> bool {
        match self {
            Self::Starred => item.is_starred,
            Self::Complete => item.is_task() && item.is_complete(),
            Self::Pending => item.is_task() && !item.is_complete(),
            Self::Task => item.is_task(),
            Self::Note => !item.is_task(),
        }
    }
}

/// Narrows `data` by each recognized keyword in order.
///
/// Applying `["task", "pending"]` yields pending tasks only; an empty input
/// collection short-circuits to an empty result. The input map is left
/// untouched.
pub fn filter_by_attributes<F>(keywords: &[String], data: &ItemMap, extra: F) -> ItemMap
where
    F: Fn(&Item) -> bool,
{
    if data.is_empty() {
        return ItemMap::new();
    }

    let mut out = data.clone();
    for keyword in keywords {
        let Some(filter) = AttributeFilter::parse(keyword) else {
            continue;
        };
        out.retain(|_, item| filter.matches(item) && extra(item));
    }
    out
}
