//! Durable store contract and implementations.
//!
//! # Responsibility
//! - Define the key-value persistence boundary the repository consumes.
//! - Keep file-format details out of the lifecycle operations.
//!
//! # Invariants
//! - Each call is atomic on its own; no guarantee spans two calls.
//! - `get`/`set` and `get_archive`/`set_archive` address independent
//!   collections; an id lives in at most one of them at any instant.

use crate::model::item::ItemMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;
mod memory;

pub use json_store::JsonStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failure with the offending path attached.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage i/o failure at `{}`: {source}", path.display())
            }
            Self::Format { path, source } => {
                write!(f, "malformed storage data in `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
        }
    }
}

/// Opaque durable store for the two item collections.
///
/// Reads return the full mapping; writes replace it wholesale. Lifecycle
/// operations perform one read-modify-write cycle per invocation.
pub trait Storage {
    fn get(&self) -> StorageResult<ItemMap>;
    fn set(&mut self, data: &ItemMap) -> StorageResult<()>;
    fn get_archive(&self) -> StorageResult<ItemMap>;
    fn set_archive(&mut self, data: &ItemMap) -> StorageResult<()>;
}
