//! JSON-file store.
//!
//! # Responsibility
//! - Persist the active and archive collections as two JSON documents
//!   under one data directory.
//!
//! # Invariants
//! - A missing file reads as an empty collection.
//! - Writes land on a temp file first and reach the target via rename, so
//!   an interrupted write never truncates existing data.

use crate::model::item::ItemMap;
use crate::storage::{Storage, StorageError, StorageResult};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const STORAGE_FILE: &str = "storage.json";
const ARCHIVE_FILE: &str = "archive.json";

/// File-backed store rooted at a data directory.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Opens (and creates, if needed) the data directory.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_map(&self, name: &str) -> StorageResult<ItemMap> {
        let path = self.dir.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ItemMap::new());
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        serde_json::from_str(&text).map_err(|source| StorageError::Format { path, source })
    }

    fn write_map(&self, name: &str, data: &ItemMap) -> StorageResult<()> {
        let path = self.dir.join(name);
        let temp = self.dir.join(format!(".{name}.tmp"));
        let text = serde_json::to_string_pretty(data).map_err(|source| StorageError::Format {
            path: path.clone(),
            source,
        })?;
        fs::write(&temp, text).map_err(|source| StorageError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &path).map_err(|source| StorageError::Io { path, source })?;
        debug!("event=storage_write status=ok file={name} items={}", data.len());
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get(&self) -> StorageResult<ItemMap> {
        self.read_map(STORAGE_FILE)
    }

    fn set(&mut self, data: &ItemMap) -> StorageResult<()> {
        self.write_map(STORAGE_FILE, data)
    }

    fn get_archive(&self) -> StorageResult<ItemMap> {
        self.read_map(ARCHIVE_FILE)
    }

    fn set_archive(&mut self, data: &ItemMap) -> StorageResult<()> {
        self.write_map(ARCHIVE_FILE, data)
    }
}
