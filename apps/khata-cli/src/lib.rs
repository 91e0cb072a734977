//! # khata-cli: Command-Line Host for Khata
//!
//! Loads configuration, reads a document, and hands it to `khata-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Command Startup                                │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,khata=debug, can be overridden with RUST_LOG        │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → khata.toml (or --config) → KHATA__* env                │
//! │     • page geometry checked once here                                   │
//! │                                                                         │
//! │  3. Read Document ────────────────────────────────────────────────────► │
//! │     • JSON → BillingDocument (+ optional quotation table)               │
//! │     • validated before any computation                                  │
//! │                                                                         │
//! │  4. Run Command ──────────────────────────────────────────────────────► │
//! │     • totals / paginate print JSON to stdout                            │
//! │     • export writes <kind>-<number>.<ext> to the output directory      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod render;

use std::io;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,khata=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs one parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let app = AppConfig::load(cli.config.as_deref())?;
    let page = app.page.pagination();
    debug!(?page, export = ?app.export, "Configuration loaded");

    match cli.command {
        Command::Totals { document } => {
            let document = input::read_document(&document)?;
            commands::totals(&document, &mut io::stdout().lock())
        }
        Command::Paginate { document } => {
            let document = input::read_document(&document)?;
            commands::paginate_plan(&document, &page, &mut io::stdout().lock())
        }
        Command::Export {
            document,
            format,
            out_dir,
        } => {
            let document = input::read_document(&document)?;
            let format = format.unwrap_or(app.export.format);
            let out_dir = out_dir.unwrap_or(app.export.out_dir);

            let artifact = commands::export_artifact(&document, &page, format)?;
            commands::write_artifact(&artifact, &out_dir)?;
            Ok(())
        }
    }
}
