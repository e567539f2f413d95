use super::backend::StorageBackend;
use super::{DataStore, DuplicateSlug, ReindexReport, SlugIndex};
use crate::error::{ResourceError, Result};
use crate::id::ResourceId;
use crate::model::{Resource, ResourceType};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct ResourceStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> ResourceStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    fn slug_index(&self, kind: ResourceType) -> Result<SlugIndex> {
        if !kind.has_slug() {
            return Err(ResourceError::TypeMismatch(kind).into());
        }
        self.backend.load_slug_index(kind)
    }
}

fn newest_first(resources: &mut [Resource]) {
    resources.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));
}

impl<B: StorageBackend> DataStore for ResourceStore<B> {
    fn write(&mut self, resource: &Resource) -> Result<()> {
        let json = serde_json::to_string_pretty(resource)?;
        self.backend.write_record(&resource.id, &json)?;
        debug!(id = %resource.id, kind = %resource.kind(), "Record written");
        Ok(())
    }

    fn read(&self, id: &ResourceId) -> Result<Resource> {
        let raw = self
            .backend
            .read_record(id)?
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn delete(&mut self, id: &ResourceId) -> Result<Resource> {
        let resource = self.read(id)?;
        self.backend.delete_record(id)?;

        for kind in ResourceType::slugged() {
            let mut index = self.backend.load_slug_index(kind)?;
            let before = index.len();
            index.retain(|_, holder| holder != id);
            if index.len() != before {
                self.backend.save_slug_index(kind, &index)?;
            }
        }

        info!(id = %id, "Record deleted");
        Ok(resource)
    }

    fn list_all(&self) -> Result<Vec<Resource>> {
        let mut resources = self
            .backend
            .list_record_ids()?
            .iter()
            .map(|id| self.read(id))
            .collect::<Result<Vec<_>>>()?;
        newest_first(&mut resources);
        Ok(resources)
    }

    fn resolve_slug(&self, kind: ResourceType, slug: &str) -> Result<Option<ResourceId>> {
        Ok(self.slug_index(kind)?.get(slug).cloned())
    }

    fn index_slug(&mut self, kind: ResourceType, slug: &str, id: &ResourceId) -> Result<()> {
        let mut index = self.slug_index(kind)?;
        index.insert(slug.to_string(), id.clone());
        self.backend.save_slug_index(kind, &index)
    }

    fn unindex_slug(&mut self, kind: ResourceType, slug: &str, id: &ResourceId) -> Result<()> {
        let mut index = self.slug_index(kind)?;
        if index.get(slug) == Some(id) {
            index.remove(slug);
            self.backend.save_slug_index(kind, &index)?;
        }
        Ok(())
    }

    fn rebuild_slug_index(&mut self) -> Result<ReindexReport> {
        let resources = self.list_all()?;
        let mut report = ReindexReport::default();

        for kind in ResourceType::slugged() {
            let mut index = SlugIndex::new();
            // Oldest first, so the earliest holder of a slug keeps it.
            for resource in resources.iter().rev().filter(|r| r.kind() == kind) {
                let Some(slug) = resource.content.indexable_slug() else {
                    report.skipped_placeholders += 1;
                    continue;
                };
                match index.get(slug) {
                    Some(kept) => {
                        warn!(%kind, slug, kept = %kept, dropped = %resource.id, "Duplicate slug");
                        report.duplicates.push(DuplicateSlug {
                            kind,
                            slug: slug.to_string(),
                            kept: kept.clone(),
                            dropped: resource.id.clone(),
                        });
                    }
                    None => {
                        index.insert(slug.to_string(), resource.id.clone());
                    }
                }
            }
            self.backend.save_slug_index(kind, &index)?;
            report.entries.insert(kind, index.len());
        }

        info!(
            entries = report.total_entries(),
            duplicates = report.duplicates.len(),
            "Slug indexes rebuilt"
        );
        Ok(report)
    }

    fn record_path(&self, id: &ResourceId) -> PathBuf {
        self.backend.record_path(id)
    }
}
