//! # Storage Layer
//!
//! This module defines the storage abstraction for quill. The [`DataStore`]
//! trait lets sessions and commands work against different storage backends.
//!
//! ## Records and Indexes
//!
//! 1. **Truth**: one JSON record per resource ID.
//! 2. **Derived**: one slug index per slugged type, mapping `slug → id`.
//!
//! The slug index is updated incrementally when an edit is committed and can be
//! rebuilt from a full record scan at any time (`reindex`). A record write and
//! its index update are separate writes; if the process dies between them,
//! `reindex` restores the index.
//!
//! ## Slug Rules
//!
//! - Slugs are unique per type. A page and an article may share one.
//! - Notes have no slugs. Slug operations on them fail with
//!   [`ResourceError::TypeMismatch`](crate::error::ResourceError::TypeMismatch).
//! - Placeholder (`.`) and empty slugs are never indexed.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: records and indexes as files under the data root.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── resources/<id>.json        # one record per ID
//! ├── index/<type>/slug.json     # one slug index per slugged type
//! ├── quill.toml                 # optional config
//! └── .lock                      # present only while an edit is in progress
//! ```

use crate::error::Result;
use crate::id::ResourceId;
use crate::model::{Resource, ResourceType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod resource_store;

/// `slug → id` for one resource type.
pub type SlugIndex = BTreeMap<String, ResourceId>;

/// Two records claiming the same slug. The older record keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSlug {
    pub kind: ResourceType,
    pub slug: String,
    pub kept: ResourceId,
    pub dropped: ResourceId,
}

/// Report from rebuilding the slug indexes.
#[derive(Debug, Default, Serialize)]
pub struct ReindexReport {
    pub entries: BTreeMap<ResourceType, usize>,
    pub duplicates: Vec<DuplicateSlug>,
    pub skipped_placeholders: usize,
}

impl ReindexReport {
    pub fn total_entries(&self) -> usize {
        self.entries.values().sum()
    }
}

/// Abstract interface for resource storage.
pub trait DataStore {
    /// Save a resource (create or replace)
    fn write(&mut self, resource: &Resource) -> Result<()>;

    /// Get a resource by ID
    fn read(&self, id: &ResourceId) -> Result<Resource>;

    /// Delete a resource and prune slug index entries pointing at it.
    /// Returns the deleted record.
    fn delete(&mut self, id: &ResourceId) -> Result<Resource>;

    /// All resources, newest first
    fn list_all(&self) -> Result<Vec<Resource>>;

    /// Resources of one type, newest first
    fn list_by_type(&self, kind: ResourceType) -> Result<Vec<Resource>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| r.kind() == kind)
            .collect())
    }

    /// The resource holding `slug` for `kind`, if any
    fn resolve_slug(&self, kind: ResourceType, slug: &str) -> Result<Option<ResourceId>>;

    fn slug_exists(&self, kind: ResourceType, slug: &str) -> Result<bool> {
        Ok(self.resolve_slug(kind, slug)?.is_some())
    }

    /// Point `slug` at `id`
    fn index_slug(&mut self, kind: ResourceType, slug: &str, id: &ResourceId) -> Result<()>;

    /// Remove `slug` if it still points at `id`
    fn unindex_slug(&mut self, kind: ResourceType, slug: &str, id: &ResourceId) -> Result<()>;

    /// Rebuild every slug index from a full scan
    fn rebuild_slug_index(&mut self) -> Result<ReindexReport>;

    /// Where the record lives (a virtual path for in-memory stores)
    fn record_path(&self, id: &ResourceId) -> PathBuf;
}
