//! `khata` binary entry point.

use anyhow::Context;
use clap::Parser;
use khata_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    khata_cli::init_tracing();

    let command = format!("{:?}", cli.command);
    khata_cli::run(cli).with_context(|| format!("khata failed: {command}"))
}
