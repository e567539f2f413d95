//! # CLI Behavior
//!
//! This is **one possible UI client** for quill, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, the
//! editor process and output formatting.
//!
//! ## The Edit Loop
//!
//! ```text
//! quill new article        # creates the record, locks, opens $EDITOR
//! quill commit             # parses the buffer, saves, unlocks
//! ```
//!
//! The editor can exit and the shell can close between the two steps; the
//! lock file in the data root carries the edit across invocations. Only one
//! edit is in flight per data root. `quill status` shows it, `quill open`
//! relaunches the editor on it, `quill discard` drops it.
//!
//! `--no-editor` prints the buffer path instead of launching anything, for
//! scripts and editors that are already running. `--commit` commits as soon
//! as the editor exits.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and dispatch
//! - `render`: Output formatting (rows, messages, JSON)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
