//! ctek - A small terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! ctek main.c
//! ctek --tab-stop 4 notes.txt
//! ctek --log-file ctek.log --perf
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ctek::app::App;
use ctek::config::{
    ConfigFlags, EditorOptions, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use ctek::perf;

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "ctek", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Display width of a tab
    #[arg(long, value_name = "N")]
    tab_stop: Option<usize>,

    /// Extra Ctrl-Q presses needed to quit with unsaved changes
    #[arg(long, value_name = "N")]
    quit_times: Option<usize>,

    /// Seconds a status message stays visible
    #[arg(long, value_name = "SECS")]
    message_timeout: Option<u64>,

    /// Write logs to this file (filter with CTEK_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log timings of loading, rendering and saving
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Log to `path` when given. The terminal belongs to the editor, so there is
/// no stderr fallback.
fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("CTEK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, "resolved flags");

    App::new(cli.file)
        .with_options(EditorOptions::from_flags(&effective))
        .run()
        .context("Application error")
}
