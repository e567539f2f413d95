use super::fs_backend::FsBackend;
use super::resource_store::ResourceStore;
use std::path::{Path, PathBuf};

pub type FileStore = ResourceStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        ResourceStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}
