use clap::Parser;
use jrnl_core::Backend;
use std::{path::PathBuf, str::FromStr};

use crate::render::ColorMode;

/// jrnl: org-mode journal from the command line
///
/// `when` is a time like `today`, `yesterday at 6am` or `friday`, ended by `:`.
/// `title` is ended by `.`. Tags are written `@tag` anywhere in the text.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Org file to append the entry to (default: $JRNLFILE, config file, ./jrnl.org)
    #[arg(long, short)]
    pub file: Option<PathBuf>,
    /// How the `when` part is resolved: `wolfram` or `local`.
    #[arg(long, value_parser = parse_backend)]
    pub backend: Option<Backend>,
    /// Print the rendered entry instead of saving it.
    #[arg(long)]
    pub dry_run: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log debug information to stderr (otherwise controlled by $JRNL_LOG).
    #[arg(long, short)]
    pub verbose: bool,
    /// Entry text, `[when:] [title.] text` (e.g., `jrnl friday: Lunch. Tacos @food`).
    /// Without text, the config `editor`, $VISUAL or $EDITOR is opened (`vim` if none
    /// is set). Saving an empty buffer fails like empty text does.
    #[arg()]
    pub text: Vec<String>,
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::from_str(s).map_err(|_| format!("unknown backend `{s}` (expected `wolfram` or `local`)"))
}
