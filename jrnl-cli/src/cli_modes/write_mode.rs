use super::editor_utils::{create_editor_buffer, resolve_editor};
use crate::{Cli, render::Renderer};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use jrnl_core::{EntryRef, Journal, TimeResolver, resolve::build_resolver};

/// What a write run produced.
#[derive(Debug)]
pub enum WriteOutcome {
    /// `--dry-run`: the rendered entry, nothing written.
    Preview(String),
    Saved(EntryRef),
}

/// Builds one entry from the command line text, or from the editor when no
/// text was given, and appends it to the journal.
pub fn write_mode(cli: &Cli, renderer: &Renderer, journal: &Journal) -> Result<()> {
    let input = entry_input(cli, journal)?;

    let now = Local::now().naive_local();
    let resolver = build_resolver(journal.config.backend, &journal.config.wolfram, now)?;

    match save_entry(&input, cli.dry_run, journal, resolver.as_ref(), now)? {
        WriteOutcome::Preview(rendered) => renderer.print_preview(&rendered),
        WriteOutcome::Saved(new_entry) => {
            renderer.print_info(&format!("Added new entry to {}", new_entry.path.display()));
            renderer.print_entry_line(&new_entry);
        }
    }
    Ok(())
}

/// The entry text: positional words joined by spaces, else the editor buffer.
///
/// An empty editor buffer is passed on as is, so it fails like empty
/// arguments do.
pub fn entry_input(cli: &Cli, journal: &Journal) -> Result<String> {
    if !cli.text.is_empty() {
        return Ok(cli.text.join(" "));
    }
    let editor = resolve_editor(&journal.config.editor);
    create_editor_buffer(&editor)
}

pub fn save_entry(
    input: &str,
    dry_run: bool,
    journal: &Journal,
    resolver: &dyn TimeResolver,
    now: NaiveDateTime,
) -> Result<WriteOutcome> {
    if dry_run {
        let (_, rendered) = journal.prepare_entry(input, resolver, now)?;
        return Ok(WriteOutcome::Preview(rendered));
    }
    Ok(WriteOutcome::Saved(journal.create_entry(input, resolver, now)?))
}
