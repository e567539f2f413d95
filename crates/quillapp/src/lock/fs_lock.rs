use super::{LockBackend, LockData, LOCK_FILE};
use crate::error::{LockError, QuillError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Lock file at `<root>/.lock`.
pub struct FsLock {
    root: PathBuf,
}

impl FsLock {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }
}

impl LockBackend for FsLock {
    fn is_locked(&self) -> Result<bool> {
        Ok(self.path().try_exists()?)
    }

    fn try_acquire(&self, data: &LockData) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path();

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(LockError::AlreadyLocked.into())
            }
            Err(e) => return Err(QuillError::Io(e)),
        };

        let written = file
            .write_all(data.to_lines().as_bytes())
            .and_then(|_| file.sync_all());
        if let Err(e) = written {
            // A half-written lock would read as corrupted; drop it instead.
            let _ = fs::remove_file(&path);
            return Err(QuillError::Io(e));
        }

        info!(id = %data.id, mode = %data.mode, "Lock acquired");
        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.path()) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(LockError::Corrupted("not valid UTF-8".to_string()).into())
            }
            Err(e) => Err(QuillError::Io(e)),
        }
    }

    fn remove(&self) -> Result<bool> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                debug!(path = %self.path().display(), "Lock removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(QuillError::Io(e)),
        }
    }

    fn location(&self) -> PathBuf {
        self.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::LockMode;
    use crate::model::ResourceType;

    fn data(root: &std::path::Path) -> LockData {
        LockData {
            buffer_path: root.join("scratch/1hk1p97490ar.md"),
            mode: LockMode::Edit,
            kind: ResourceType::Page,
            id: "1hk1p97490ar".parse().unwrap(),
        }
    }

    #[test]
    fn acquire_read_release() {
        let dir = tempfile::tempdir().unwrap();
        let lock = FsLock::new(dir.path().to_path_buf());
        let data = data(dir.path());

        assert!(!lock.is_locked().unwrap());
        lock.try_acquire(&data).unwrap();
        assert!(lock.is_locked().unwrap());
        assert_eq!(lock.read().unwrap(), data);

        lock.release().unwrap();
        assert!(!lock.is_locked().unwrap());
        assert!(matches!(
            lock.read(),
            Err(QuillError::Lock(LockError::Missing))
        ));
    }

    #[test]
    fn file_has_exactly_four_lines() {
        let dir = tempfile::tempdir().unwrap();
        let lock = FsLock::new(dir.path().to_path_buf());
        lock.try_acquire(&data(dir.path())).unwrap();

        let raw = fs::read_to_string(dir.path().join(LOCK_FILE)).unwrap();
        assert_eq!(raw.split('\n').count(), 4);
        assert!(!raw.ends_with('\n'));
    }

    #[test]
    fn second_acquire_fails() {
        let dir = tempfile::tempdir().unwrap();
        let lock = FsLock::new(dir.path().to_path_buf());
        lock.try_acquire(&data(dir.path())).unwrap();

        let other = FsLock::new(dir.path().to_path_buf());
        assert!(matches!(
            other.try_acquire(&data(dir.path())),
            Err(QuillError::Lock(LockError::AlreadyLocked))
        ));
    }

    #[test]
    fn release_without_lock_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let lock = FsLock::new(dir.path().to_path_buf());
        assert!(matches!(
            lock.release(),
            Err(QuillError::Lock(LockError::Missing))
        ));
    }

    #[test]
    fn force_clear_removes_corrupted_lock() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOCK_FILE), "garbage").unwrap();
        let lock = FsLock::new(dir.path().to_path_buf());

        assert!(matches!(
            lock.read(),
            Err(QuillError::Lock(LockError::Corrupted(_)))
        ));
        assert_eq!(lock.force_clear().unwrap(), None);
        assert!(!lock.is_locked().unwrap());
    }
}
