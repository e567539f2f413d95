//! # Command Layer
//!
//! This module contains the **business logic** of quill. Each command lives in
//! its own submodule as a plain function over the store and the edit session.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or colors
//! - **Argument parsing**: that's the CLI layer's job
//! - **Launching editors**: commands hand back the buffer path; the UI decides
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected`: resources written or deleted by the command
//! - `listed`: resources to display
//! - `lock`: the lock the command created or found
//! - `paths`: file paths (scratch buffers)
//! - `ids`: freshly generated IDs
//! - `reindex`: report from a slug index rebuild
//! - `config`: effective configuration entries
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and `MemLock`, with a temp dir for
//! scratch buffers.
//!
//! ## Command Modules
//!
//! - [`new`]: Create a resource and lock it for editing
//! - [`edit`]: Lock an existing resource for editing
//! - [`commit`]: Persist the edit buffer and release the lock
//! - [`discard`]: Release the lock without saving
//! - [`status`]: Describe the current lock
//! - [`unlock`]: Force-clear a stuck or corrupted lock
//! - [`paths`]: Scratch buffer path of the current edit
//! - [`list`]: List resources
//! - [`show`]: Show one resource
//! - [`delete`]: Delete a resource
//! - [`reindex`]: Rebuild slug indexes
//! - [`id`]: Generate IDs
//! - [`config`]: Effective configuration
//! - [`helpers`]: Resource selectors

use crate::id::ResourceId;
use crate::lock::LockData;
use crate::model::Resource;
use crate::store::ReindexReport;
use serde::Serialize;
use std::path::PathBuf;

pub mod commit;
pub mod config;
pub mod delete;
pub mod discard;
pub mod edit;
pub mod helpers;
pub mod id;
pub mod list;
pub mod new;
pub mod paths;
pub mod reindex;
pub mod show;
pub mod status;
pub mod unlock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<Resource>,
    pub listed: Vec<Resource>,
    pub lock: Option<LockData>,
    pub paths: Vec<PathBuf>,
    pub ids: Vec<ResourceId>,
    pub reindex: Option<ReindexReport>,
    pub config: Vec<(String, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, resources: Vec<Resource>) -> Self {
        self.affected = resources;
        self
    }

    pub fn with_listed(mut self, resources: Vec<Resource>) -> Self {
        self.listed = resources;
        self
    }

    pub fn with_lock(mut self, lock: LockData) -> Self {
        self.paths = vec![lock.buffer_path.clone()];
        self.lock = Some(lock);
        self
    }
}
