use super::SlugIndex;
use crate::error::Result;
use crate::id::ResourceId;
use crate::model::ResourceType;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ResourceStore handles the "what" (serialization, slug rules, reindex).
pub trait StorageBackend {
    // --- Record Operations ---

    /// Read the raw JSON for a record.
    /// Returns Ok(None) if it does not exist; Err only on actual I/O errors.
    fn read_record(&self, id: &ResourceId) -> Result<Option<String>>;

    /// Write a record.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_record(&self, id: &ResourceId, json: &str) -> Result<()>;

    /// Delete a record. Returns false if it did not exist.
    fn delete_record(&self, id: &ResourceId) -> Result<bool>;

    /// List every record ID in storage.
    fn list_record_ids(&self) -> Result<Vec<ResourceId>>;

    // --- Slug Index Operations ---

    /// Load the slug index for a type (empty if none was saved yet)
    fn load_slug_index(&self, kind: ResourceType) -> Result<SlugIndex>;

    /// Save the slug index for a type
    fn save_slug_index(&self, kind: ResourceType, index: &SlugIndex) -> Result<()>;

    // --- Paths ---

    /// For FsBackend, the real record path. For MemBackend, a virtual path.
    fn record_path(&self, id: &ResourceId) -> PathBuf;
}
