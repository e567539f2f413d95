//! # Edit Lock
//!
//! One edit can be in progress at a time, across every process sharing a data
//! root. The lock is a small text file whose presence *is* the lock:
//!
//! ```text
//! /tmp/quill-3f2c.../1hk1p97490ar.md
//! new
//! article
//! 1hk1p97490ar
//! ```
//!
//! Exactly four lines: the scratch buffer path, the mode (`new` or `edit`),
//! the resource type and the resource ID. The file is written without a
//! trailing newline; one trailing newline is tolerated on read so a lock that
//! passed through an editor still parses.
//!
//! ## Lifecycle
//!
//! - **Acquire**: `create`/`edit` write the file with an atomic create-new open.
//!   A second acquire fails with [`LockError::AlreadyLocked`].
//! - **Release**: `commit`/`discard` remove it.
//! - **Force clear**: operator recovery for a lock that is corrupted or whose
//!   editor session was lost. Nothing expires on its own.
//!
//! ## Implementations
//!
//! - [`fs_lock::FsLock`]: `<root>/.lock` on disk.
//! - [`mem_lock::MemLock`]: for testing sessions without filesystem I/O.

use crate::error::{LockError, QuillError, Result};
use crate::id::ResourceId;
use crate::model::ResourceType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod fs_lock;
pub mod mem_lock;

pub const LOCK_FILE: &str = ".lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    New,
    Edit,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::New => "new",
            LockMode::Edit => "edit",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockMode {
    type Err = LockError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "new" => Ok(LockMode::New),
            "edit" => Ok(LockMode::Edit),
            other => Err(LockError::Corrupted(format!("unknown mode '{}'", other))),
        }
    }
}

/// Contents of the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockData {
    pub buffer_path: PathBuf,
    pub mode: LockMode,
    pub kind: ResourceType,
    pub id: ResourceId,
}

impl LockData {
    pub fn to_lines(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.buffer_path.display(),
            self.mode,
            self.kind,
            self.id
        )
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, LockError> {
        let raw = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .unwrap_or(raw);
        let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();

        let [path, mode, kind, id] = lines.as_slice() else {
            return Err(LockError::Corrupted(format!(
                "expected 4 lines, found {}",
                lines.len()
            )));
        };

        if path.trim().is_empty() {
            return Err(LockError::Corrupted("empty buffer path".to_string()));
        }
        let kind = kind
            .parse::<ResourceType>()
            .map_err(|e| LockError::Corrupted(e.to_string()))?;
        let id = id
            .parse::<ResourceId>()
            .map_err(|e| LockError::Corrupted(e.to_string()))?;

        Ok(LockData {
            buffer_path: PathBuf::from(path),
            mode: mode.parse()?,
            kind,
            id,
        })
    }

    /// The scratch directory holding the buffer.
    pub fn scratch_dir(&self) -> Option<PathBuf> {
        self.buffer_path.parent().map(|p| p.to_path_buf())
    }
}

/// Raw lock storage. Implementors provide the four I/O primitives; the
/// lock state machine (`read`, `release`, `force_clear`) is shared.
pub trait LockBackend {
    /// Whether a lock file is present, readable or not.
    fn is_locked(&self) -> Result<bool>;

    /// Writes `data` only if no lock exists. Must be atomic: of two racing
    /// callers exactly one succeeds, the other gets `AlreadyLocked`.
    fn try_acquire(&self, data: &LockData) -> Result<()>;

    /// Raw lock text, `None` when absent.
    fn read_raw(&self) -> Result<Option<String>>;

    /// Removes the lock. Returns false if there was none.
    fn remove(&self) -> Result<bool>;

    /// Location of the lock, for messages.
    fn location(&self) -> PathBuf;

    fn read(&self) -> Result<LockData> {
        let raw = self.read_raw()?.ok_or(LockError::Missing)?;
        Ok(LockData::parse(&raw)?)
    }

    fn release(&self) -> Result<()> {
        if self.remove()? {
            Ok(())
        } else {
            Err(LockError::Missing.into())
        }
    }

    /// Removes the lock even if it does not parse. Returns the lock data when
    /// it could still be read.
    fn force_clear(&self) -> Result<Option<LockData>> {
        let data = match self.read() {
            Ok(data) => Some(data),
            Err(QuillError::Lock(LockError::Corrupted(_))) => None,
            Err(e) => return Err(e),
        };
        self.remove()?;
        Ok(data)
    }
}
