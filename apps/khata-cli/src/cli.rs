use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ExportFormat;

/// Computes GST totals and lays out invoices and quotations.
#[derive(Parser, Debug)]
#[command(name = "khata", version)]
pub struct Cli {
    /// Config file (defaults to ./khata.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print computed lines, totals and the tax summary as JSON
    Totals {
        /// Document JSON file
        document: PathBuf,
    },

    /// Print the page plan: row ranges and block variants per page
    Paginate {
        document: PathBuf,
    },

    /// Render the document and write it to the output directory
    Export {
        document: PathBuf,

        /// Overrides `[export] format`
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Overrides `[export] out_dir`
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_overrides() {
        let cli = Cli::try_parse_from([
            "khata",
            "export",
            "bill.json",
            "--format",
            "json",
            "--out-dir",
            "out",
            "--config",
            "shop.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Command::Export {
                document,
                format,
                out_dir,
            } => {
                assert_eq!(document, PathBuf::from("bill.json"));
                assert_eq!(format, Some(ExportFormat::Json));
                assert_eq!(out_dir, Some(PathBuf::from("out")));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["khata", "export", "bill.json", "--format", "pdf"]).is_err());
    }
}
