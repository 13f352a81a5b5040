//! In-memory store for tests and embedding.

use crate::model::item::ItemMap;
use crate::storage::{Storage, StorageResult};

/// Non-durable store holding both collections in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    active: ItemMap,
    archive: ItemMap,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self) -> StorageResult<ItemMap> {
        Ok(self.active.clone())
    }

    fn set(&mut self, data: &ItemMap) -> StorageResult<()> {
        self.active = data.clone();
        Ok(())
    }

    fn get_archive(&self) -> StorageResult<ItemMap> {
        Ok(self.archive.clone())
    }

    fn set_archive(&mut self, data: &ItemMap) -> StorageResult<()> {
        self.archive = data.clone();
        Ok(())
    }
}
