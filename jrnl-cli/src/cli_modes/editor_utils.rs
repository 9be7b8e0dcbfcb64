use anyhow::{Context, Result, bail};
use std::{fs, path::Path, process::Command};
use tracing::debug;

/// Config editor, then $VISUAL, then $EDITOR, then `vim`.
pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vim".into())
}

/// Opens an empty temp file in `editor_cmd` and returns what was saved.
pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("jrnl")
        .suffix(".org")
        .tempfile()
        .context("creating temp file for the editor")?;

    let path = file.path().to_path_buf();
    open_file_in_editor(editor_cmd, &path)?;
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Runs `editor_cmd` on `path`. The command may carry its own arguments
/// (`emacs -nw -Q`).
pub fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let mut words = editor_cmd.split_whitespace();
    let Some(program) = words.next() else {
        bail!("No editor configured");
    };
    debug!(program, path = %path.display(), "opening editor");
    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .with_context(|| format!("could not start editor `{editor_cmd}`"))?;
    if !status.success() {
        bail!("Editor exited with status {}", status);
    }
    Ok(())
}
