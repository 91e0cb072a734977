//! # Export Pipeline
//!
//! Drives one export from a validated document to the bytes of a file.
//!
//! ## Stages
//! ```text
//! ┌─────────┐   ┌─────────┐   ┌───────────────┐   ┌───────────┐
//! │ Sizing  │──►│ Slicing │──►│ PerPageRender │──►│ Assembled │
//! └─────────┘   └─────────┘   └───────────────┘   └───────────┘
//!  max rows      pages +        renderer called     renderer joins
//!  per page      blocks         once per page       the pages
//! ```
//!
//! Every run starts at `Sizing`; nothing carries over between exports.
//! Page breaks are decided before any rendering starts, so a renderer only
//! chooses a template from the block variants it is given.

use khata_core::{BillingDocument, DocumentLayout, DocumentPage, PaginationConfig};
use tracing::{debug, info};

use crate::error::CliResult;

/// Stage of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Sizing,
    Slicing,
    PerPageRender,
    Assembled,
}

impl ExportStage {
    /// The stage that follows this one, `None` once assembled.
    pub const fn next(&self) -> Option<ExportStage> {
        match self {
            ExportStage::Sizing => Some(ExportStage::Slicing),
            ExportStage::Slicing => Some(ExportStage::PerPageRender),
            ExportStage::PerPageRender => Some(ExportStage::Assembled),
            ExportStage::Assembled => None,
        }
    }
}

/// Turns resolved pages into an output file.
///
/// `render_page` is called once per page in page order, then `assemble`
/// once to produce the file contents.
pub trait PageRenderer {
    /// File extension of the assembled output, without the dot.
    fn extension(&self) -> &'static str;

    fn render_page(&mut self, layout: &DocumentLayout, page: &DocumentPage) -> CliResult<()>;

    fn assemble(&mut self, layout: &DocumentLayout) -> CliResult<Vec<u8>>;
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub pages: usize,
    pub bytes: Vec<u8>,
}

/// One export run. Records the stages it has passed through.
#[derive(Debug)]
pub struct ExportRun {
    stage: ExportStage,
    history: Vec<ExportStage>,
}

impl Default for ExportRun {
    fn default() -> Self {
        ExportRun::new()
    }
}

impl ExportRun {
    pub fn new() -> Self {
        ExportRun {
            stage: ExportStage::Sizing,
            history: vec![ExportStage::Sizing],
        }
    }

    pub fn stage(&self) -> ExportStage {
        self.stage
    }

    /// Stages entered so far, in order.
    pub fn history(&self) -> &[ExportStage] {
        &self.history
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            debug!(from = ?self.stage, to = ?next, "Export stage");
            self.stage = next;
            self.history.push(next);
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// On error the run stays at the stage that failed.
    pub fn run<R: PageRenderer>(
        &mut self,
        document: &BillingDocument,
        config: &PaginationConfig,
        renderer: &mut R,
    ) -> CliResult<ExportArtifact> {
        // Sizing
        let max_rows = config.max_rows_per_page()?;
        debug!(max_rows, "Page capacity");
        self.advance();

        // Slicing
        let layout = DocumentLayout::build(document, config)?;
        debug!(
            pages = layout.pages.len(),
            rows = layout.row_count(),
            "Document sliced"
        );
        self.advance();

        // PerPageRender
        for page in &layout.pages {
            renderer.render_page(&layout, page)?;
        }

        let bytes = renderer.assemble(&layout)?;
        self.advance();
        let file_name = format!("{}.{}", layout.file_stem(), renderer.extension());

        info!(
            file = %file_name,
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "Export assembled"
        );

        Ok(ExportArtifact {
            file_name,
            pages: layout.pages.len(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use chrono::NaiveDate;
    use khata_core::{BlockVariant, DocumentKind, LineItem, Money, Party, TaxRate};

    /// Records which variants each page was rendered with.
    #[derive(Default)]
    struct RecordingRenderer {
        pages: Vec<(usize, BlockVariant, BlockVariant, usize)>,
        fail_on: Option<usize>,
        fail_assemble: bool,
    }

    impl PageRenderer for RecordingRenderer {
        fn extension(&self) -> &'static str {
            "rec"
        }

        fn render_page(&mut self, _layout: &DocumentLayout, page: &DocumentPage) -> CliResult<()> {
            let p = &page.page;
            if self.fail_on == Some(p.page_number) {
                return Err(CliError::Render {
                    page: p.page_number,
                    reason: "out of ink".to_string(),
                });
            }
            self.pages
                .push((p.page_number, p.header_variant, p.footer_variant, p.rows.len()));
            Ok(())
        }

        fn assemble(&mut self, layout: &DocumentLayout) -> CliResult<Vec<u8>> {
            if self.fail_assemble {
                return Err(CliError::Render {
                    page: layout.pages.len(),
                    reason: "binder jammed".to_string(),
                });
            }
            Ok(vec![0; self.pages.len()])
        }
    }

    fn party(state: &str) -> Party {
        Party {
            name: "Party".to_string(),
            address_lines: vec![],
            state: state.to_string(),
            gstin: None,
        }
    }

    fn document(rows: usize) -> BillingDocument {
        BillingDocument {
            kind: DocumentKind::Invoice,
            number: "INV-202501-17".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            due_date: None,
            biller: party("Maharashtra"),
            client: party("Gujarat"),
            items: (0..rows)
                .map(|i| LineItem::new(format!("Item {i}"), 1, Money::from_rupees(10), TaxRate::from_percent(5)))
                .collect(),
            notes: None,
        }
    }

    #[test]
    fn test_run_walks_every_stage() {
        let mut run = ExportRun::new();
        let mut renderer = RecordingRenderer::default();
        let artifact = run
            .run(&document(40), &PaginationConfig::a4_portrait(), &mut renderer)
            .unwrap();

        assert_eq!(
            run.history(),
            &[
                ExportStage::Sizing,
                ExportStage::Slicing,
                ExportStage::PerPageRender,
                ExportStage::Assembled
            ]
        );
        assert_eq!(run.stage(), ExportStage::Assembled);
        assert_eq!(artifact.file_name, "invoice-INV-202501-17.rec");
        assert_eq!(artifact.pages, 3);
        assert_eq!(artifact.bytes.len(), 3);
    }

    #[test]
    fn test_renderer_sees_pages_in_order() {
        let mut renderer = RecordingRenderer::default();
        ExportRun::new()
            .run(&document(40), &PaginationConfig::a4_portrait(), &mut renderer)
            .unwrap();

        assert_eq!(
            renderer.pages,
            vec![
                (1, BlockVariant::Full, BlockVariant::Continuation, 18),
                (2, BlockVariant::Continuation, BlockVariant::Continuation, 18),
                (3, BlockVariant::Continuation, BlockVariant::Full, 4),
            ]
        );
    }

    #[test]
    fn test_bad_config_stops_at_sizing() {
        let mut config = PaginationConfig::a4_portrait();
        config.estimated_row_height = 0.0;

        let mut run = ExportRun::new();
        let err = run
            .run(&document(3), &config, &mut RecordingRenderer::default())
            .unwrap_err();

        assert!(matches!(err, CliError::PageConfig(_)));
        assert_eq!(run.stage(), ExportStage::Sizing);
    }

    #[test]
    fn test_render_failure_stops_at_per_page_render() {
        let mut renderer = RecordingRenderer {
            fail_on: Some(2),
            ..Default::default()
        };
        let mut run = ExportRun::new();
        let err = run
            .run(&document(40), &PaginationConfig::a4_portrait(), &mut renderer)
            .unwrap_err();

        assert!(matches!(err, CliError::Render { page: 2, .. }));
        assert_eq!(run.stage(), ExportStage::PerPageRender);
        assert_eq!(renderer.pages.len(), 1);
    }

    #[test]
    fn test_assemble_failure_never_reaches_assembled() {
        let mut renderer = RecordingRenderer {
            fail_assemble: true,
            ..Default::default()
        };
        let mut run = ExportRun::new();
        let err = run
            .run(&document(40), &PaginationConfig::a4_portrait(), &mut renderer)
            .unwrap_err();

        assert!(matches!(err, CliError::Render { page: 3, .. }));
        assert_eq!(run.stage(), ExportStage::PerPageRender);
        assert!(!run.history().contains(&ExportStage::Assembled));
        assert_eq!(renderer.pages.len(), 3);
    }

    #[test]
    fn test_stage_after_assembled_is_none() {
        assert_eq!(ExportStage::Assembled.next(), None);
    }
}
