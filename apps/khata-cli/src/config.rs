//! # Configuration
//!
//! Settings for the page layout and the export output.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KHATA__PAGE__ROW_HEIGHT=9`)
//! 2. Config file (`khata.toml` in the working directory, or `--config`)
//! 3. Defaults (this file): A4 portrait, text export to `.`
//!
//! The core applies no page defaults of its own; they all live here.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use khata_core::PaginationConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub page: PageSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    pub page_height: f64,
    pub page_width: f64,
    pub margin: f64,
    pub header_height: f64,
    pub footer_height: f64,
    pub row_height: f64,
}

/// Where and how `khata export` writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub out_dir: PathBuf,
    pub format: ExportFormat,
}

/// Output format of the bundled renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Fixed-width text, one form feed between pages.
    #[default]
    Text,
    /// The resolved page layout as JSON.
    Json,
}

impl ExportFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings::from(PaginationConfig::a4_portrait())
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            out_dir: PathBuf::from("."),
            format: ExportFormat::Text,
        }
    }
}

impl From<PaginationConfig> for PageSettings {
    fn from(config: PaginationConfig) -> Self {
        PageSettings {
            page_height: config.page_height,
            page_width: config.page_width,
            margin: config.margin,
            header_height: config.estimated_header_height,
            footer_height: config.estimated_footer_height,
            row_height: config.estimated_row_height,
        }
    }
}

impl PageSettings {
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            page_height: self.page_height,
            page_width: self.page_width,
            margin: self.margin,
            estimated_header_height: self.header_height,
            estimated_footer_height: self.footer_height,
            estimated_row_height: self.row_height,
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file, and the environment.
    ///
    /// An explicit `path` must exist; the default `khata.toml` is optional.
    /// The page geometry is validated here so a bad file fails at startup.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let file = match path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name("khata").required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("KHATA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.page.pagination().max_rows_per_page()?;

        Ok(app)
    }
}
