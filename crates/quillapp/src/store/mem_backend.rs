use super::backend::StorageBackend;
use super::SlugIndex;
use crate::error::{QuillError, Result};
use crate::id::ResourceId;
use crate::model::ResourceType;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since quill is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<BTreeMap<ResourceId, String>>,
    slug_indexes: RefCell<HashMap<ResourceType, SlugIndex>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(QuillError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read_record(&self, id: &ResourceId) -> Result<Option<String>> {
        Ok(self.records.borrow().get(id).cloned())
    }

    fn write_record(&self, id: &ResourceId, json: &str) -> Result<()> {
        self.check_write()?;
        self.records
            .borrow_mut()
            .insert(id.clone(), json.to_string());
        Ok(())
    }

    fn delete_record(&self, id: &ResourceId) -> Result<bool> {
        Ok(self.records.borrow_mut().remove(id).is_some())
    }

    fn list_record_ids(&self) -> Result<Vec<ResourceId>> {
        Ok(self.records.borrow().keys().cloned().collect())
    }

    fn load_slug_index(&self, kind: ResourceType) -> Result<SlugIndex> {
        Ok(self
            .slug_indexes
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    fn save_slug_index(&self, kind: ResourceType, index: &SlugIndex) -> Result<()> {
        self.check_write()?;
        self.slug_indexes.borrow_mut().insert(kind, index.clone());
        Ok(())
    }

    fn record_path(&self, id: &ResourceId) -> PathBuf {
        PathBuf::from(format!("memory://resources/{}.json", id))
    }
}
