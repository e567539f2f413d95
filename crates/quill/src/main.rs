//! # quill CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/quillapp/`: core library, UI-agnostic business logic
//! - `crates/quill/`: this CLI, depends on `quillapp`
//!
//! ## Layering
//!
//! ```text
//! CLI (src/cli/)           clap parsing, editor launch, rendering
//!   └ API (quillapp::api)     selector parsing, dispatch, CmdResult
//!      └ commands              business logic, no terminal I/O
//! ```
//!
//! Errors from the library are `quillapp::error::QuillError`; they become
//! `anyhow::Error` here and are printed as `Error: <message>` with exit code 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
