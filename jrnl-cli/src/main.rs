mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli_modes::{use_color, write_mode};
use jrnl_core::{Config, Journal};
use render::Renderer;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `JRNL_LOG=debug`.
const LOG_ENV: &str = "JRNL_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jrnl: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(file) = &cli.file {
        config.journal_file = file.clone();
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    let journal = Journal::with_config(config)?;
    let renderer = Renderer::new(use_color(cli.color));

    write_mode(&cli, &renderer, &journal)
}
