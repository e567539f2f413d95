//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for quill operations, whatever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the store, the edit session and the loaded configuration
//! - **Normalizes inputs** (selector strings into [`Selector`]s)
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and never launches an editor;
//! the CLI opens the buffer path the API hands back.
//!
//! ## Selectors
//!
//! - **ID**: `1hk1p97490ar` (case-insensitive)
//! - **Type and slug**: `article/hello-world`, `page/about`
//!
//! Notes have no slugs, so `note/...` is rejected with a type mismatch.
//!
//! ## Generic Over Storage and Lock
//!
//! `QuillApi<S: DataStore, L: LockBackend>`:
//! - Production: `QuillApi<FileStore, FsLock>`
//! - Testing: `QuillApi<InMemoryStore, MemLock>`

use crate::commands::{self, helpers::Selector, CmdResult};
use crate::config::QuillConfig;
use crate::error::Result;
use crate::id::IdGenerator;
use crate::lock::fs_lock::FsLock;
use crate::lock::LockBackend;
use crate::model::ResourceType;
use crate::session::{EditSession, SessionOptions};
use crate::store::fs::FileStore;
use crate::store::DataStore;
use std::path::{Path, PathBuf};

/// The main API facade for quill operations.
pub struct QuillApi<S: DataStore, L: LockBackend> {
    store: S,
    session: EditSession<L>,
    config: QuillConfig,
    root: PathBuf,
}

impl QuillApi<FileStore, FsLock> {
    /// Opens the store at `root` with its layered configuration.
    pub fn open(root: PathBuf) -> Result<Self> {
        let config = QuillConfig::load(&root)?;
        let store = FileStore::new(root.clone());
        let lock = FsLock::new(root.clone());
        Ok(Self::new(store, lock, config, root))
    }
}

impl<S: DataStore, L: LockBackend> QuillApi<S, L> {
    pub fn new(store: S, lock: L, config: QuillConfig, root: PathBuf) -> Self {
        let session = EditSession::new(lock, IdGenerator::new(), SessionOptions::from(&config));
        Self {
            store,
            session,
            config,
            root,
        }
    }

    pub fn config(&self) -> &QuillConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn new_resource(&mut self, kind: &str) -> Result<CmdResult> {
        let kind: ResourceType = kind.parse()?;
        commands::new::run(&mut self.store, &self.session, kind)
    }

    pub fn edit(&mut self, selector: &str) -> Result<CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::edit::run(&self.store, &self.session, &selector)
    }

    pub fn commit(&mut self) -> Result<CmdResult> {
        commands::commit::run(&mut self.store, &self.session)
    }

    pub fn discard(&mut self) -> Result<CmdResult> {
        commands::discard::run(&self.session)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.session)
    }

    pub fn force_unlock(&mut self) -> Result<CmdResult> {
        commands::unlock::run(&self.session)
    }

    pub fn buffer_path(&self) -> Result<CmdResult> {
        commands::paths::run(&self.store, &self.session)
    }

    pub fn list(&self, kind: Option<&str>) -> Result<CmdResult> {
        let kind = kind.map(str::parse::<ResourceType>).transpose()?;
        commands::list::run(&self.store, kind)
    }

    pub fn show(&self, selector: &str) -> Result<CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::show::run(&self.store, &selector)
    }

    pub fn delete(&mut self, selector: &str) -> Result<CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::delete::run(&mut self.store, &self.session, &selector)
    }

    pub fn reindex(&mut self) -> Result<CmdResult> {
        commands::reindex::run(&mut self.store)
    }

    pub fn generate_ids(&self, at: Option<i64>, count: usize) -> Result<CmdResult> {
        commands::id::run(self.session.ids(), at, count)
    }

    pub fn show_config(&self) -> Result<CmdResult> {
        commands::config::run(&self.config, &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QuillError, ResourceError};
    use crate::lock::mem_lock::MemLock;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn api() -> (TempDir, QuillApi<InMemoryStore, MemLock>) {
        let scratch = tempfile::tempdir().unwrap();
        let config = QuillConfig {
            scratch_dir: Some(scratch.path().to_path_buf()),
            ..Default::default()
        };
        let api = QuillApi::new(
            InMemoryStore::new(),
            MemLock::new(),
            config,
            PathBuf::from("/data"),
        );
        (scratch, api)
    }

    #[test]
    fn new_edit_commit_show() {
        let (_scratch, mut api) = api();

        let created = api.new_resource("article").unwrap();
        let lock = created.lock.unwrap();
        assert!(lock.buffer_path.starts_with(_scratch.path()));
        fs::write(&lock.buffer_path, "---\ntitle: Test\n---\nHello").unwrap();
        api.commit().unwrap();

        let shown = api.show("article/test").unwrap();
        assert_eq!(shown.listed[0].id, lock.id);

        let editing = api.edit(lock.id.as_str()).unwrap();
        assert!(editing.lock.is_some());
        api.discard().unwrap();
    }

    #[test]
    fn bad_inputs_are_errors() {
        let (_scratch, mut api) = api();
        assert!(matches!(
            api.new_resource("post"),
            Err(QuillError::Resource(ResourceError::UnknownType(_)))
        ));
        assert!(api.list(Some("posts")).is_err());
        assert!(api.show("note/x").is_err());
    }

    #[test]
    fn list_filters_by_type_name() {
        let (_scratch, mut api) = api();
        api.new_resource("note").unwrap();
        api.discard().unwrap();

        assert_eq!(api.list(Some("note")).unwrap().listed.len(), 1);
        assert!(api.list(Some("page")).unwrap().listed.is_empty());
    }

    #[test]
    fn filesystem_session_round_trip() {
        let mut env = crate::test_utils::TestEnv::new();
        let lock = env.api.new_resource("page").unwrap().lock.unwrap();
        assert!(env.root.join(".lock").is_file());
        assert!(lock.buffer_path.starts_with(env.scratch_dir()));

        fs::write(&lock.buffer_path, "---\ntitle: Colophon\n---\nBuilt with quill").unwrap();
        env.api.commit().unwrap();

        assert!(!env.root.join(".lock").exists());
        assert!(env.root.join("index/page/slug.json").is_file());
        assert_eq!(env.api.show("page/colophon").unwrap().listed[0].id, lock.id);
    }

    #[test]
    fn config_uses_root() {
        let (_scratch, api) = api();
        let result = api.show_config().unwrap();
        assert!(result.messages[0].content.contains("/data"));
        assert_eq!(api.root(), Path::new("/data"));
    }
}
