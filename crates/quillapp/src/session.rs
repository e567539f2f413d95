//! # Edit Sessions
//!
//! An edit session turns an external editor into a single-writer transaction
//! over the store. The lock file records which resource is being edited and
//! where its scratch buffer lives; it survives process exits, so `new` and
//! `commit` can run as separate invocations with the editor in between.
//!
//! ```text
//!            create / edit                commit
//!   Idle ──────────────────► Locked ───────────────► Idle
//!                              │
//!                              └──── discard ──────► Idle
//! ```
//!
//! ## Commit
//!
//! 1. Read the lock, the buffer and the current record.
//! 2. Parse the buffer; slugged types take the front-matter slug or derive one
//!    from the title. A slugged resource that ends up without a slug fails
//!    with [`ResourceError::EmptySlug`].
//! 3. If another resource of the same type holds that slug, fail with
//!    [`ResourceError::SlugConflict`]. Nothing is written and the lock and
//!    buffer stay, so the author can fix the buffer and commit again.
//! 4. Write the record (edits also stamp `updated`), then update the slug index.
//! 5. Release the lock and remove the scratch directory.
//!
//! ## Recovery
//!
//! A lock is never repaired automatically. A missing buffer can be re-rendered
//! with [`EditSession::reopen`]; a corrupted lock needs
//! [`EditSession::force_clear`].

use crate::buffer;
use crate::config::QuillConfig;
use crate::error::{LockError, QuillError, ResourceError, Result};
use crate::id::{IdGenerator, ResourceId};
use crate::lock::{LockBackend, LockData, LockMode};
use crate::model::{Resource, ResourceType};
use crate::slug::DEFAULT_SLUG_LENGTH;
use crate::store::DataStore;
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Scratch directories are named `quill-<uuid>`. Only directories with this
/// prefix are ever removed.
pub const SCRATCH_PREFIX: &str = "quill-";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub scratch_root: PathBuf,
    pub slug_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            scratch_root: std::env::temp_dir(),
            slug_limit: DEFAULT_SLUG_LENGTH,
        }
    }
}

impl From<&QuillConfig> for SessionOptions {
    fn from(config: &QuillConfig) -> Self {
        Self {
            scratch_root: config.scratch_root(),
            slug_limit: config.slug_max_length,
        }
    }
}

pub struct EditSession<L: LockBackend> {
    lock: L,
    ids: IdGenerator,
    options: SessionOptions,
}

impl<L: LockBackend> EditSession<L> {
    pub fn new(lock: L, ids: IdGenerator, options: SessionOptions) -> Self {
        Self { lock, ids, options }
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn is_locked(&self) -> Result<bool> {
        self.lock.is_locked()
    }

    /// Starts a new resource: writes a placeholder record, renders it into a
    /// fresh scratch buffer and takes the lock in `new` mode.
    pub fn create<S: DataStore>(&self, store: &mut S, kind: ResourceType) -> Result<LockData> {
        if self.lock.is_locked()? {
            return Err(LockError::AlreadyLocked.into());
        }

        let id = self.ids.generate()?;
        let resource = Resource::new(id.clone(), kind, Utc::now());
        store.write(&resource)?;

        let acquired = self
            .prepare_buffer(&resource)
            .and_then(|buffer_path| self.acquire(buffer_path, LockMode::New, &resource));

        match acquired {
            Ok(data) => {
                info!(id = %id, %kind, "Created resource for editing");
                Ok(data)
            }
            Err(e) => {
                if let Err(cleanup) = store.delete(&id) {
                    warn!(id = %id, error = %cleanup, "Could not remove placeholder record");
                }
                Err(e)
            }
        }
    }

    /// Opens an existing resource for editing in `edit` mode.
    pub fn edit<S: DataStore>(&self, store: &S, id: &ResourceId) -> Result<LockData> {
        if self.lock.is_locked()? {
            return Err(LockError::AlreadyLocked.into());
        }

        let resource = store.read(id)?;
        let buffer_path = self.prepare_buffer(&resource)?;
        let data = self.acquire(buffer_path, LockMode::Edit, &resource)?;
        info!(id = %id, kind = %resource.kind(), "Opened resource for editing");
        Ok(data)
    }

    /// The current lock.
    pub fn read(&self) -> Result<LockData> {
        self.lock.read()
    }

    /// Persists the buffer into the locked resource and ends the session.
    pub fn commit<S: DataStore>(&self, store: &mut S) -> Result<Resource> {
        let data = self.lock.read()?;
        let raw = fs::read_to_string(&data.buffer_path).map_err(|e| {
            QuillError::Api(format!(
                "Cannot read edit buffer {}: {}",
                data.buffer_path.display(),
                e
            ))
        })?;

        let current = store.read(&data.id)?;
        if current.kind() != data.kind {
            return Err(LockError::Corrupted(format!(
                "lock says {} but {} is a {}",
                data.kind,
                data.id,
                current.kind()
            ))
            .into());
        }

        let content = buffer::parse(&raw, data.kind)?.into_content(self.options.slug_limit);
        if content.slug() == Some("") {
            return Err(ResourceError::EmptySlug(data.kind).into());
        }
        let new_slug = content.indexable_slug().map(str::to_string);
        let old_slug = current.content.indexable_slug().map(str::to_string);

        if let Some(slug) = &new_slug {
            if let Some(holder) = store.resolve_slug(data.kind, slug)? {
                if holder != data.id {
                    return Err(ResourceError::SlugConflict {
                        kind: data.kind,
                        slug: slug.clone(),
                        existing: holder.to_string(),
                    }
                    .into());
                }
            }
        }

        let mut resource = current;
        resource.content = content;
        if data.mode == LockMode::Edit {
            resource.updated = Utc::now();
        }
        store.write(&resource)?;

        if let Some(old) = old_slug.filter(|old| Some(old) != new_slug.as_ref()) {
            store.unindex_slug(data.kind, &old, &data.id)?;
        }
        if let Some(slug) = &new_slug {
            store.index_slug(data.kind, slug, &data.id)?;
        }

        self.lock.release()?;
        remove_scratch(&data);
        info!(id = %data.id, mode = %data.mode, slug = new_slug.as_deref().unwrap_or(""), "Committed");
        Ok(resource)
    }

    /// Ends the session without saving. A record created by `create` stays
    /// with its placeholder content.
    pub fn discard(&self) -> Result<LockData> {
        let data = self.lock.read()?;
        remove_scratch(&data);
        self.lock.release()?;
        info!(id = %data.id, "Discarded edit");
        Ok(data)
    }

    /// Removes the lock even when it is corrupted. Returns the lock data when
    /// it was still readable; its scratch directory is removed as well.
    pub fn force_clear(&self) -> Result<Option<LockData>> {
        let data = self.lock.force_clear()?;
        match &data {
            Some(data) => remove_scratch(data),
            None => warn!(lock = %self.lock.location().display(), "Cleared unreadable lock"),
        }
        Ok(data)
    }

    /// The held lock, with its buffer re-rendered from the record if the
    /// scratch file has gone missing.
    pub fn reopen<S: DataStore>(&self, store: &S) -> Result<LockData> {
        let data = self.lock.read()?;
        if !data.buffer_path.exists() {
            let resource = store.read(&data.id)?;
            if let Some(dir) = data.buffer_path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&data.buffer_path, buffer::render(&resource.content)?)?;
            warn!(path = %data.buffer_path.display(), "Edit buffer was missing; re-rendered from the record");
        }
        Ok(data)
    }

    fn prepare_buffer(&self, resource: &Resource) -> Result<PathBuf> {
        let dir = self
            .options
            .scratch_root
            .join(format!("{}{}", SCRATCH_PREFIX, Uuid::new_v4()));
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.md", resource.id));
        let written = buffer::render(&resource.content)
            .and_then(|text| fs::write(&path, text).map_err(QuillError::Io));
        if let Err(e) = written {
            remove_dir(&dir);
            return Err(e);
        }

        debug!(path = %path.display(), "Edit buffer written");
        Ok(path)
    }

    fn acquire(&self, buffer_path: PathBuf, mode: LockMode, resource: &Resource) -> Result<LockData> {
        let data = LockData {
            buffer_path,
            mode,
            kind: resource.kind(),
            id: resource.id.clone(),
        };
        if let Err(e) = self.lock.try_acquire(&data) {
            remove_scratch(&data);
            return Err(e);
        }
        Ok(data)
    }
}

fn is_scratch_dir(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(SCRATCH_PREFIX))
}

fn remove_dir(dir: &Path) {
    match fs::remove_dir_all(dir) {
        Ok(()) => debug!(path = %dir.display(), "Scratch directory removed"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %dir.display(), error = %e, "Could not remove scratch directory"),
    }
}

fn remove_scratch(data: &LockData) {
    match data.scratch_dir() {
        Some(dir) if is_scratch_dir(&dir) => remove_dir(&dir),
        _ => warn!(
            path = %data.buffer_path.display(),
            "Buffer is not inside a scratch directory; leaving it in place"
        ),
    }
}
