//! Presentation boundary.
//!
//! # Responsibility
//! - Define the sink for structured outcome events and display calls.
//!
//! # Invariants
//! - The core passes already-computed data; formatting belongs to the
//!   implementation behind this trait.

use crate::model::item::{Item, ItemId, Priority};
use crate::query::group::GroupedItems;
use crate::query::stats::Stats;
use crate::service::BookError;
use std::path::Path;

/// Sink for lifecycle outcome events and read-only display calls.
///
/// Every method has a no-op default so implementations (and tests) only
/// override the events they care about.
pub trait Presenter {
    fn created(&self, _item: &Item) {}
    fn checked(&self, _ids: &[ItemId]) {}
    fn starred(&self, _ids: &[ItemId]) {}
    fn edited(&self, _id: ItemId) {}
    fn moved(&self, _id: ItemId, _boards: &[String]) {}
    fn priority_updated(&self, _id: ItemId, _priority: Priority) {}
    fn deleted(&self, _ids: &[ItemId]) {}
    fn restored(&self, _ids: &[ItemId]) {}
    fn category_updated(&self, _name: &str, _color: Option<&str>) {}
    fn imported(&self, _path: &Path) {}
    fn exported(&self, _path: &Path) {}

    fn display_by_board(&self, _groups: &GroupedItems) {}
    fn display_by_date(&self, _groups: &GroupedItems) {}
    fn display_stats(&self, _stats: &Stats) {}

    /// Reports a fatal operation error.
    fn report(&self, _error: &BookError) {}
}

/// Presenter that swallows every event; for embedding and tests.
pub struct NullPresenter;

impl Presenter for NullPresenter {}
