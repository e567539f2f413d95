use crate::error::{QuillError, Result};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Picks the editor command.
/// Checks the configured editor, then $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor(configured: Option<&str>) -> Result<String> {
    if let Some(editor) = configured.filter(|e| !e.trim().is_empty()) {
        return Ok(editor.to_string());
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(QuillError::Api(
        "No editor found. Set $EDITOR or `editor` in quill.toml.".to_string(),
    ))
}

/// Opens `file_path` in the editor and waits for it to close.
///
/// The editor command may carry arguments (`code --wait`); it is split on
/// whitespace and the path is appended.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P, configured: Option<&str>) -> Result<()> {
    let editor = get_editor(configured)?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| QuillError::Api("Editor command is empty".to_string()))?;

    debug!(editor = %editor, path = %path.display(), "Launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| QuillError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(QuillError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_editor_wins() {
        assert_eq!(get_editor(Some("hx")).unwrap(), "hx");
    }

    #[test]
    fn test_blank_configured_editor_is_ignored() {
        // Falls through to the environment or a fallback; either way not blank.
        if let Ok(editor) = get_editor(Some("   ")) {
            assert!(!editor.trim().is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_command_with_args() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("buffer.md");
        std::fs::write(&file, "x").unwrap();
        // `true` ignores its arguments and exits 0.
        open_in_editor(&file, Some("true --wait")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("buffer.md");
        assert!(open_in_editor(&file, Some("false")).is_err());
    }
}
