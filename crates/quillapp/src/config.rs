//! # Configuration
//!
//! Quill configuration is loaded with [`confique`] from TOML files and
//! environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `QUILL_EDITOR`, `QUILL_SLUG_MAX_LENGTH`, `QUILL_SCRATCH_DIR`.
//! 2. **Store Config**: `<root>/quill.toml`, next to the data it configures.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `editor` | `$EDITOR` / `$VISUAL` | Command used to open edit buffers |
//! | `slug_max_length` | `50` | Longest slug derived from a title |
//! | `scratch_dir` | OS temp dir | Where edit buffers are written |
//!
//! ## Data Root
//!
//! The store itself lives in the data root: the `--root` flag, else the
//! `QUILL_ROOT` environment variable, else the OS data directory.

use crate::error::{QuillError, Result};
use crate::slug::DEFAULT_SLUG_LENGTH;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quill.toml";
pub const ROOT_ENV: &str = "QUILL_ROOT";

/// Configuration for quill, stored in `quill.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuillConfig {
    /// Editor command for edit buffers. Falls back to $EDITOR, then $VISUAL.
    #[config(env = "QUILL_EDITOR")]
    pub editor: Option<String>,

    /// Slugs derived from titles are trimmed to this many characters.
    #[config(env = "QUILL_SLUG_MAX_LENGTH", default = 50)]
    pub slug_max_length: usize,

    /// Directory for scratch edit buffers.
    #[config(env = "QUILL_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            editor: None,
            slug_max_length: DEFAULT_SLUG_LENGTH,
            scratch_dir: None,
        }
    }
}

impl QuillConfig {
    /// Loads the layered configuration for the store at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_with_global(root, global_config_path().as_deref())
    }

    pub fn load_with_global(root: &Path, global: Option<&Path>) -> Result<Self> {
        let mut builder = QuillConfig::builder().env().file(root.join(CONFIG_FILE));
        if let Some(global) = global {
            builder = builder.file(global);
        }
        let config = builder.load()?;
        if config.slug_max_length == 0 {
            return Err(QuillError::Api(
                "slug_max_length must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Parent directory for scratch buffer directories.
    pub fn scratch_root(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// `(key, value)` pairs for display. Unset optional keys show as empty.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("editor", self.editor.clone().unwrap_or_default()),
            ("slug_max_length", self.slug_max_length.to_string()),
            (
                "scratch_dir",
                self.scratch_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "quill")
}

pub fn global_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Resolves the data root: explicit flag, then `QUILL_ROOT`, then the OS data dir.
pub fn resolve_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            QuillError::Api(format!(
                "Could not determine a data directory. Set {} or pass --root.",
                ROOT_ENV
            ))
        })
}
