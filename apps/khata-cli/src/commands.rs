//! # Commands
//!
//! Each command takes an already validated document and writes to a
//! caller-supplied `Write`, so `main` prints to stdout and tests read a
//! buffer. Only [`write_artifact`] touches the filesystem.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use khata_core::gst::{compute_document, tax_breakdown};
use khata_core::pagination::paginate;
use khata_core::{
    BillingDocument, BlockVariant, ComputedLine, DocumentTotals, PaginationConfig, TaxSlabSummary,
};
use serde::Serialize;
use tracing::info;

use crate::config::ExportFormat;
use crate::error::{CliError, CliResult};
use crate::export::{ExportArtifact, ExportRun};
use crate::render::Renderer;

// =============================================================================
// Output Shapes
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsReport {
    is_inter_state: bool,
    lines: Vec<ComputedLine>,
    totals: DocumentTotals,
    tax_summary: Vec<TaxSlabSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PagePlan {
    max_rows_per_page: usize,
    row_count: usize,
    pages: Vec<PlannedPage>,
}

/// Rows are 1-based and inclusive; an empty page has `first_row > last_row`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlannedPage {
    page_number: usize,
    first_row: usize,
    last_row: usize,
    header_variant: BlockVariant,
    footer_variant: BlockVariant,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out).map_err(|e| CliError::io("Failed to write", "<stdout>", e))
}

// =============================================================================
// totals
// =============================================================================

/// Prints computed lines, totals and the per-rate tax summary.
pub fn totals<W: Write>(document: &BillingDocument, out: &mut W) -> CliResult<()> {
    let computed = compute_document(document);
    let report = TotalsReport {
        is_inter_state: computed.is_inter_state,
        tax_summary: tax_breakdown(&computed.lines),
        totals: computed.totals,
        lines: computed.lines,
    };

    info!(
        number = %document.number,
        lines = report.lines.len(),
        grand_total = report.totals.grand_total.paise(),
        "Totals computed"
    );
    write_json(out, &report)
}

// =============================================================================
// paginate
// =============================================================================

/// Prints which rows land on which page and the block variants.
pub fn paginate_plan<W: Write>(
    document: &BillingDocument,
    config: &PaginationConfig,
    out: &mut W,
) -> CliResult<()> {
    let max_rows_per_page = config.max_rows_per_page()?;
    let pages = paginate(&document.items, config)?;

    let mut next_row = 1;
    let planned: Vec<PlannedPage> = pages
        .iter()
        .map(|page| {
            let first_row = next_row;
            next_row += page.rows.len();
            PlannedPage {
                page_number: page.page_number,
                first_row,
                last_row: next_row - 1,
                header_variant: page.header_variant,
                footer_variant: page.footer_variant,
            }
        })
        .collect();

    info!(
        number = %document.number,
        rows = document.items.len(),
        pages = planned.len(),
        max_rows_per_page,
        "Pages planned"
    );

    write_json(
        out,
        &PagePlan {
            max_rows_per_page,
            row_count: document.items.len(),
            pages: planned,
        },
    )
}

// =============================================================================
// export
// =============================================================================

/// Runs the export pipeline with the renderer for `format`.
pub fn export_artifact(
    document: &BillingDocument,
    config: &PaginationConfig,
    format: ExportFormat,
) -> CliResult<ExportArtifact> {
    let mut renderer = Renderer::for_format(format);
    ExportRun::new().run(document, config, &mut renderer)
}

/// Writes `artifact` into `out_dir`, creating the directory if needed.
pub fn write_artifact(artifact: &ExportArtifact, out_dir: &Path) -> CliResult<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|e| CliError::io("Failed to create", out_dir, e))?;

    let path = out_dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes).map_err(|e| CliError::io("Failed to write", &path, e))?;

    info!(
        path = %path.display(),
        pages = artifact.pages,
        bytes = artifact.bytes.len(),
        "Export written"
    );
    Ok(path)
}
