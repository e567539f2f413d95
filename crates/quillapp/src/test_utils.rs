use crate::api::QuillApi;
use crate::config::QuillConfig;
use crate::lock::fs_lock::FsLock;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A filesystem-backed API over a throwaway data root, with scratch buffers
/// kept inside the same temp dir.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: QuillApi<FileStore, FsLock>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("data");
        let config = QuillConfig {
            scratch_dir: Some(temp_dir.path().join("scratch")),
            ..Default::default()
        };
        let api = QuillApi::new(
            FileStore::new(root.clone()),
            FsLock::new(root.clone()),
            config,
            root.clone(),
        );
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self._temp_dir.path().join("scratch")
    }
}
