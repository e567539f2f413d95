use super::{LockBackend, LockData, LOCK_FILE};
use crate::error::{LockError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory lock for testing.
///
/// Stores the raw lock text so tests can plant corrupted locks.
#[derive(Default)]
pub struct MemLock {
    raw: RefCell<Option<String>>,
}

impl MemLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: replace the lock text verbatim.
    pub fn set_raw(&self, raw: Option<&str>) {
        *self.raw.borrow_mut() = raw.map(str::to_string);
    }
}

impl LockBackend for MemLock {
    fn is_locked(&self) -> Result<bool> {
        Ok(self.raw.borrow().is_some())
    }

    fn try_acquire(&self, data: &LockData) -> Result<()> {
        let mut raw = self.raw.borrow_mut();
        if raw.is_some() {
            return Err(LockError::AlreadyLocked.into());
        }
        *raw = Some(data.to_lines());
        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>> {
        Ok(self.raw.borrow().clone())
    }

    fn remove(&self) -> Result<bool> {
        Ok(self.raw.borrow_mut().take().is_some())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(format!("memory://{}", LOCK_FILE))
    }
}
