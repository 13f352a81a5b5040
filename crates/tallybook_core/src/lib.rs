//! Core domain logic for tallybook.
//! This crate is the single source of truth for item lifecycle invariants.

pub mod logging;
pub mod model;
pub mod presenter;
pub mod query;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging};
pub use model::item::{
    Category, Item, ItemId, ItemKind, ItemMap, Priority, DEFAULT_BOARD, DEFAULT_CATEGORY,
};
pub use presenter::{NullPresenter, Presenter};
pub use query::filter::{filter_by_attributes, AttributeFilter};
pub use query::group::{group_by_board, group_by_date, list_boards, list_dates, GroupedItems};
pub use query::stats::{collect_stats, CategoryTally, Stats};
pub use service::{next_id, Book, BookError, BookResult};
pub use storage::{JsonStorage, MemoryStorage, Storage, StorageError, StorageResult};
