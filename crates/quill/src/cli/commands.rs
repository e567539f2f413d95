//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Launches the external editor
//! - Handles argument parsing
//! - Installs the tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap derive in `setup.rs`
//! 2. **Context Setup**: resolve the data root and open the API
//! 3. **Dispatch**: route each command to an API call
//! 4. **Output Formatting**: `render.rs`, or JSON with `--output json`
//! 5. **Editor Handoff**: open the scratch buffer, optionally commit on exit

use super::render::{render_json, render_list, render_messages, render_resource};
use super::setup::{parse_cli, Commands, OutputFormat};
use anyhow::{Context, Result};
use chrono::Utc;
use quillapp::api::QuillApi;
use quillapp::commands::CmdResult;
use quillapp::config::resolve_root;
use quillapp::editor::open_in_editor;
use quillapp::lock::fs_lock::FsLock;
use quillapp::store::fs::FileStore;
use tracing::debug;
use tracing::Level;

type Api = QuillApi<FileStore, FsLock>;

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let root = resolve_root(cli.root)?;
    debug!(root = %root.display(), "Resolved data root");
    let mut api: Api = QuillApi::open(root)?;

    match cli.command {
        Commands::New {
            kind,
            no_editor,
            commit,
        } => {
            let result = api.new_resource(&kind)?;
            handle_lock_result(&mut api, result, no_editor, commit)
        }
        Commands::Edit {
            selector,
            no_editor,
            commit,
        } => {
            let result = api.edit(&selector)?;
            handle_lock_result(&mut api, result, no_editor, commit)
        }
        Commands::Open => {
            let result = api.buffer_path()?;
            handle_lock_result(&mut api, result, false, false)
        }
        Commands::Commit => print_messages(&api.commit()?),
        Commands::Discard => print_messages(&api.discard()?),
        Commands::Status => {
            let result = api.status()?;
            print_messages(&result)?;
            if let Some(path) = result.paths.first() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Path => {
            for path in api.buffer_path()?.paths {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Unlock { force: _ } => print_messages(&api.force_unlock()?),
        Commands::List { kind, output } => {
            let result = api.list(kind.as_deref())?;
            match output {
                OutputFormat::Json => print!("{}", render_json(&result.listed)?),
                OutputFormat::Text => {
                    print!("{}", render_list(&result.listed, Utc::now()));
                    print_messages(&result)?;
                }
            }
            Ok(())
        }
        Commands::Show { selector, output } => {
            let result = api.show(&selector)?;
            let resource = result
                .listed
                .first()
                .context("show returned no resource")?;
            match output {
                OutputFormat::Json => print!("{}", render_json(resource)?),
                OutputFormat::Text => print!(
                    "{}",
                    render_resource(resource, result.paths.first().map(|p| p.as_path()))
                ),
            }
            Ok(())
        }
        Commands::Delete { selector } => print_messages(&api.delete(&selector)?),
        Commands::Reindex => print_messages(&api.reindex()?),
        Commands::Id { at, count } => {
            for id in api.generate_ids(at, count)?.ids {
                println!("{}", id);
            }
            Ok(())
        }
        Commands::Config => {
            let result = api.show_config()?;
            for (key, value) in &result.config {
                println!("{} = {}", key, value);
            }
            print_messages(&result)
        }
    }
}

/// After `new`, `edit` or `open`: print the buffer path, or hand it to the
/// editor and optionally commit once the editor exits.
fn handle_lock_result(
    api: &mut Api,
    result: CmdResult,
    no_editor: bool,
    commit: bool,
) -> Result<()> {
    print_messages(&result)?;
    let lock = result
        .lock
        .context("command did not return the edit lock")?;

    if no_editor {
        println!("{}", lock.buffer_path.display());
        return Ok(());
    }

    open_in_editor(&lock.buffer_path, api.config().editor.as_deref()).with_context(|| {
        format!(
            "editor failed; the edit is still open at {}",
            lock.buffer_path.display()
        )
    })?;

    if commit {
        print_messages(&api.commit()?)
    } else {
        println!("Run `quill commit` to save or `quill discard` to abandon.");
        Ok(())
    }
}

fn print_messages(result: &CmdResult) -> Result<()> {
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Logs go to stderr so stdout stays machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
