use super::backend::StorageBackend;
use super::SlugIndex;
use crate::error::{QuillError, Result};
use crate::id::ResourceId;
use crate::model::ResourceType;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

const RESOURCES_DIR: &str = "resources";
const INDEX_DIR: &str = "index";
const SLUG_INDEX_FILE: &str = "slug.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resources_dir(&self) -> PathBuf {
        self.root.join(RESOURCES_DIR)
    }

    fn index_dir(&self, kind: ResourceType) -> PathBuf {
        self.root.join(INDEX_DIR).join(kind.as_str())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(QuillError::Io)?;
        }
        Ok(())
    }

    /// Atomic write: tmp file in the target's directory, then rename.
    fn atomic_write(&self, dir: &Path, target: &Path, content: &str) -> Result<()> {
        self.ensure_dir(dir)?;
        let tmp_path = dir.join(format!(".quill-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(QuillError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(QuillError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_record(&self, id: &ResourceId) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(id)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuillError::Io(e)),
        }
    }

    fn write_record(&self, id: &ResourceId, json: &str) -> Result<()> {
        self.atomic_write(&self.resources_dir(), &self.record_path(id), json)
    }

    fn delete_record(&self, id: &ResourceId) -> Result<bool> {
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(QuillError::Io(e)),
        }
    }

    fn list_record_ids(&self) -> Result<Vec<ResourceId>> {
        let dir = self.resources_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(QuillError::Io)? {
            let path = entry.map_err(QuillError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match stem.parse::<ResourceId>() {
                Ok(id) => ids.push(id),
                Err(_) => warn!(path = %path.display(), "Skipping file with a non-ID name"),
            }
        }
        Ok(ids)
    }

    fn load_slug_index(&self, kind: ResourceType) -> Result<SlugIndex> {
        let path = self.index_dir(kind).join(SLUG_INDEX_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(serde_json::from_str(&raw).map_err(QuillError::Serialization)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SlugIndex::new()),
            Err(e) => Err(QuillError::Io(e)),
        }
    }

    fn save_slug_index(&self, kind: ResourceType, index: &SlugIndex) -> Result<()> {
        let dir = self.index_dir(kind);
        let content = serde_json::to_string_pretty(index).map_err(QuillError::Serialization)?;
        self.atomic_write(&dir, &dir.join(SLUG_INDEX_FILE), &content)
    }

    fn record_path(&self, id: &ResourceId) -> PathBuf {
        self.resources_dir().join(format!("{}.json", id))
    }
}
