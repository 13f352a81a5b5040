//! Item domain model.
//!
//! # Responsibility
//! - Define the Task/Note record as a tagged union over a shared base.
//! - Apply construction defaults: sentinel board, category name and color.
//!
//! # Invariants
//! - `boards` is deduplicated and never empty after construction.
//! - The variant payload never changes kind after construction.
//! - An id is meaningful only within the collection that currently holds
//!   the item; moves between collections reassign it.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for an item within one collection (active or archive).
pub type ItemId = u32;

/// One repository collection. Ascending key order is load-bearing: board and
/// date discovery walk it to produce first-seen ordering.
pub type ItemMap = BTreeMap<ItemId, Item>;

/// Sentinel board applied when no board label is supplied.
pub const DEFAULT_BOARD: &str = "My Board";

/// Sentinel category name applied when a note has no explicit category.
pub const DEFAULT_CATEGORY: &str = "notes";

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid hex color regex")
});

/// Returns whether `value` is a 3- or 6-digit `#hex` color string.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Removes duplicate labels while keeping first-occurrence order.
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Normal,
    Medium,
    High,
}

impl Priority {
    /// Maps a numeric level (1..=3) to a priority.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Normal),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Numeric level in 1..=3.
    pub fn level(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Human-readable label used by presentation layers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.level()
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_level(value).ok_or_else(|| format!("priority level out of range: {value}"))
    }
}

/// Note category: a board-like name plus an optional shared color.
///
/// The color is shared by name across all notes: updating one category's
/// color applies to every note carrying that name. `None` renders as the
/// presentation layer's default blue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: Option<String>,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            name: DEFAULT_CATEGORY.to_string(),
            color: None,
        }
    }
}

/// Variant payload discriminated by the serialized `kind` tag.
///
/// The tag is the persisted form of the "is this a task" discriminator and
/// never mutates for a live item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Task {
        is_complete: bool,
        priority: Priority,
        /// Raw `MM/DD/YY[YY]` text as supplied at creation.
        due_date: Option<String>,
    },
    Note {
        category: Category,
    },
}

/// A tracked task or note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within whichever collection currently holds the item.
    pub id: ItemId,
    pub description: String,
    /// Deduplicated board labels; never empty.
    pub boards: Vec<String>,
    /// Creation instant, epoch milliseconds. Immutable.
    pub timestamp: i64,
    /// Calendar-day string derived from `timestamp`, e.g. `Wed Aug 06 2026`.
    /// Immutable; used only for date grouping.
    pub date: String,
    pub is_starred: bool,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Creates a task with construction defaults applied.
    pub fn task(
        id: ItemId,
        description: impl Into<String>,
        boards: Vec<String>,
        priority: Priority,
        due_date: Option<String>,
    ) -> Self {
        Self::with_kind(
            id,
            description,
            boards,
            ItemKind::Task {
                is_complete: false,
                priority,
                due_date,
            },
        )
    }

    /// Creates a note; an absent category gets the `notes` default.
    pub fn note(
        id: ItemId,
        description: impl Into<String>,
        boards: Vec<String>,
        category: Option<Category>,
    ) -> Self {
        Self::with_kind(
            id,
            description,
            boards,
            ItemKind::Note {
                category: category.unwrap_or_default(),
            },
        )
    }

    fn with_kind(
        id: ItemId,
        description: impl Into<String>,
        boards: Vec<String>,
        kind: ItemKind,
    ) -> Self {
        let mut boards = dedup_labels(boards);
        if boards.is_empty() {
            boards.push(DEFAULT_BOARD.to_string());
        }
        let now = Local::now();
        Self {
            id,
            description: description.into(),
            boards,
            timestamp: now.timestamp_millis(),
            date: now.format("%a %b %d %Y").to_string(),
            is_starred: false,
            kind,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self.kind, ItemKind::Task { .. })
    }

    /// Completion state; always `false` for notes.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Task {
                is_complete: true,
                ..
            }
        )
    }

    pub fn priority(&self) -> Option<Priority> {
        match &self.kind {
            ItemKind::Task { priority, .. } => Some(*priority),
            ItemKind::Note { .. } => None,
        }
    }

    pub fn due_date(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Task { due_date, .. } => due_date.as_deref(),
            ItemKind::Note { .. } => None,
        }
    }

    pub fn category(&self) -> Option<&Category> {
        match &self.kind {
            ItemKind::Note { category } => Some(category),
            ItemKind::Task { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{dedup_labels, is_hex_color, Item, Priority, DEFAULT_BOARD};

    #[test]
    fn hex_color_accepts_three_and_six_digits() {
        assert!(is_hex_color("#abc"));
        assert!(is_hex_color("#A1B2C3"));
        assert!(!is_hex_color("#ab"));
        assert!(!is_hex_color("#abcd"));
        assert!(!is_hex_color("abc"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn dedup_labels_keeps_first_occurrence_order() {
        let labels = vec![
            "@work".to_string(),
            "@home".to_string(),
            "@work".to_string(),
        ];
        assert_eq!(dedup_labels(labels), vec!["@work", "@home"]);
    }

    #[test]
    fn empty_boards_default_to_sentinel() {
        let item = Item::task(1, "pay rent", Vec::new(), Priority::default(), None);
        assert_eq!(item.boards, vec![DEFAULT_BOARD]);
    }

    #[test]
    fn priority_level_roundtrip() {
        for level in 1..=3 {
            let priority = Priority::from_level(level).unwrap();
            assert_eq!(priority.level(), level);
        }
        assert!(Priority::from_level(0).is_none());
        assert!(Priority::from_level(4).is_none());
    }
}
