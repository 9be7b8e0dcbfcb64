//! The `Journal` struct: parses, resolves, renders and appends entries.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::entry::ParsedEntry;
use crate::parse_input::FieldSplitter;
use crate::render::{Renderer, day_heading_marker, format_day_heading};
use crate::resolve::TimeResolver;

/// Metadata about an entry that was written.
#[derive(Debug)]
pub struct EntryRef {
    pub path: PathBuf,
    pub title: String,
    pub tags: Vec<String>,
    pub time: NaiveDateTime,
    pub when_expression: String,
    pub time_resolution_failed: bool,
}

/// Writes entries into a single org file, grouped under one top-level
/// heading per calendar day.
#[derive(Debug)]
pub struct Journal {
    pub config: Config,
    splitter: FieldSplitter,
    renderer: Renderer,
}

impl Journal {
    /// Creates a `Journal` with a specific `Config`.
    pub fn with_config(config: Config) -> Result<Self> {
        let splitter = config.splitter().context("invalid delimiter configuration")?;
        let renderer = Renderer::new(config.tag_column);
        Ok(Self {
            config,
            splitter,
            renderer,
        })
    }

    /// Splits, resolves and renders `input` without touching the journal file.
    ///
    /// `now` is the fallback time if `resolver` fails.
    pub fn prepare_entry(
        &self,
        input: &str,
        resolver: &dyn TimeResolver,
        now: NaiveDateTime,
    ) -> Result<(ParsedEntry, String)> {
        let mut entry = self.splitter.split(input)?;
        entry.resolve_with(resolver, now);
        let rendered = self.renderer.render(&entry);
        Ok((entry, rendered))
    }

    /// Parses and saves a new entry from a single string.
    ///
    /// The entry lands under today's heading (taken from `now`), whatever
    /// time it resolved to.
    pub fn create_entry(
        &self,
        input: &str,
        resolver: &dyn TimeResolver,
        now: NaiveDateTime,
    ) -> Result<EntryRef> {
        let (entry, rendered) = self.prepare_entry(input, resolver, now)?;
        self.append(&rendered, now.date())?;

        Ok(EntryRef {
            path: self.config.journal_file.clone(),
            title: entry.title,
            tags: entry.tags,
            time: entry.resolved_time,
            when_expression: entry.when_expression,
            time_resolution_failed: entry.time_resolution_failed,
        })
    }

    /// Appends `rendered` to the journal file, adding a heading for `today`
    /// first if the file has none yet.
    pub fn append(&self, rendered: &str, today: NaiveDate) -> Result<()> {
        let path = &self.config.journal_file;
        let existing = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "starting new journal file");
                String::new()
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }

        let mut out = String::new();
        if !existing.contains(&day_heading_marker(today)) {
            out.push_str(&format_day_heading(today));
        }
        out.push_str(rendered);

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        f.write_all(out.as_bytes())
            .with_context(|| format!("appending entry to {}", path.display()))?;
        info!(path = %path.display(), "appended entry");
        Ok(())
    }
}
