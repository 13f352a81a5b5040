//! Lifecycle operations and their error taxonomy.
//!
//! # Responsibility
//! - Orchestrate storage reads/writes and presenter events per operation.
//! - Define the fatal-per-invocation error type shared by all operations.
//!
//! # Invariants
//! - Validation precedes mutation in every operation; a failed validation
//!   leaves both collections untouched.

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod book;
pub mod parse;

pub use book::{next_id, Book};

pub type BookResult<T> = Result<T, BookError>;

/// Fatal operation error.
///
/// Input-shape variants come from malformed token lists, reference variants
/// from ids/boards that do not resolve, and the remainder from persistence.
#[derive(Debug)]
pub enum BookError {
    MissingId,
    InvalidId(String),
    /// More than one `@id` target was supplied.
    InvalidIdCount,
    MissingDescription,
    MissingBoards,
    MissingCategory,
    InvalidColor(String),
    InvalidPriority,
    InvalidRange(String),
    UnknownBoard(String),
    InvalidBoardArgumentCount(usize),
    MissingPath,
    TooManyPaths(usize),
    ImportFailed(StorageError),
    ExportFailed(StorageError),
    Storage(StorageError),
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "no id was given as input"),
            Self::InvalidId(id) => write!(f, "unable to find item with id: {id}"),
            Self::InvalidIdCount => write!(f, "more than one id was given as input"),
            Self::MissingDescription => write!(f, "no description was given as input"),
            Self::MissingBoards => write!(f, "no boards were given as input"),
            Self::MissingCategory => write!(f, "no category was given as input"),
            Self::InvalidColor(token) => {
                write!(f, "invalid category color `{token}`; expected #rgb or #rrggbb")
            }
            Self::InvalidPriority => write!(f, "priority can only be 1, 2 or 3"),
            Self::InvalidRange(token) => write!(f, "bad date range: {token}"),
            Self::UnknownBoard(name) => write!(f, "specified board does not exist: {name}"),
            Self::InvalidBoardArgumentCount(expected) => {
                write!(f, "expected {expected} board names as input")
            }
            Self::MissingPath => write!(f, "no file path was given as input"),
            Self::TooManyPaths(count) => {
                write!(f, "too many file paths were given as input: {count}")
            }
            Self::ImportFailed(source) => write!(f, "import failed: {source}"),
            Self::ExportFailed(source) => write!(f, "export failed: {source}"),
            Self::Storage(source) => write!(f, "{source}"),
        }
    }
}

impl Error for BookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ImportFailed(source) | Self::ExportFailed(source) | Self::Storage(source) => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<StorageError> for BookError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
