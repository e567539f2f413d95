//! # quillapp
//!
//! Core library for quill, a personal content store. Authors create and edit
//! typed resources (pages, articles, notes) in their own text editor; quill
//! keeps one edit in flight at a time and persists resources as JSON records.
//!
//! ## Layers
//!
//! ```text
//! api        thin facade, parses selectors and type names
//!  └ commands   business logic, returns CmdResult
//!     └ session    edit lock state machine (create / edit / commit / discard)
//!        ├ store      records + per-type slug indexes (fs and in-memory)
//!        └ lock       the global .lock file (fs and in-memory)
//! ```
//!
//! Leaf modules: [`id`] (time-ordered IDs), [`model`] (resource types),
//! [`slug`], [`buffer`] (front matter edit buffers), [`config`], [`editor`]
//! and [`error`].
//!
//! Nothing in this crate writes to stdout or stderr. Diagnostics go through
//! `tracing`; the binary decides where they end up.

pub mod api;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod id;
pub mod lock;
pub mod model;
pub mod session;
pub mod slug;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
