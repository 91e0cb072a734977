//! # Document Layout
//!
//! Joins the GST engine and the paginator: computes a document, splits its
//! rows into pages, and resolves which header and footer each page prints.
//!
//! ## Page Blocks
//! ```text
//! ┌──────────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │ HEADER Full          │ │ HEADER Continuation  │ │ HEADER Continuation  │
//! │ title, number, dates │ │ number, "continued"  │ │ number, "continued"  │
//! │ biller, client       │ │                      │ │                      │
//! ├──────────────────────┤ ├──────────────────────┤ ├──────────────────────┤
//! │ rows 1..=18          │ │ rows 19..=36         │ │ rows 37..=40         │
//! ├──────────────────────┤ ├──────────────────────┤ ├──────────────────────┤
//! │ FOOTER Continuation  │ │ FOOTER Continuation  │ │ FOOTER Full          │
//! │ carried forward Σ    │ │ carried forward Σ    │ │ totals, tax summary, │
//! │                      │ │                      │ │ notes                │
//! └──────────────────────┘ └──────────────────────┘ └──────────────────────┘
//! ```
//!
//! The renderer picks a template from the block variant; it never decides
//! page breaks itself.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::gst::{compute_document, tax_breakdown};
use crate::money::Money;
use crate::pagination::{paginate, BlockVariant, Page, PaginationConfig};
use crate::types::{
    BillingDocument, ComputedDocument, ComputedLine, DocumentKind, DocumentTotals, Party,
    TaxSlabSummary,
};

// =============================================================================
// Document Numbers & File Names
// =============================================================================

/// A document number in the `PREFIX-YYYYMM-SEQ` scheme (`INV-202501-17`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentNumber {
    pub kind: DocumentKind,
    pub year: i32,
    pub month: u32,
    pub sequence: u32,
}

impl DocumentNumber {
    pub fn new(kind: DocumentKind, year: i32, month: u32, sequence: u32) -> Self {
        DocumentNumber {
            kind,
            year,
            month,
            sequence,
        }
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:04}{:02}-{}",
            self.kind.number_prefix(),
            self.year,
            self.month,
            self.sequence
        )
    }
}

impl FromStr for DocumentNumber {
    type Err = CoreError;

    /// ## Example
    /// ```rust
    /// use khata_core::document::DocumentNumber;
    /// use khata_core::DocumentKind;
    ///
    /// let number: DocumentNumber = "INV-202501-17".parse().unwrap();
    /// assert_eq!(number.kind, DocumentKind::Invoice);
    /// assert_eq!(number.sequence, 17);
    /// assert_eq!(number.to_string(), "INV-202501-17");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidDocumentNumber(s.to_string());

        let mut parts = s.split('-');
        let (Some(prefix), Some(period), Some(sequence), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let kind = [DocumentKind::Invoice, DocumentKind::Quotation]
            .into_iter()
            .find(|k| k.number_prefix() == prefix)
            .ok_or_else(invalid)?;

        if period.len() != 6 || !period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = period[..4].parse().map_err(|_| invalid())?;
        let month: u32 = period[4..].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u32 = sequence.parse().map_err(|_| invalid())?;

        Ok(DocumentNumber::new(kind, year, month, sequence))
    }
}

/// File name without extension: `invoice-INV-202501-17`.
///
/// `/` in the number (common in `2024-25/0042` style numbering) becomes `-`.
pub fn export_file_stem(kind: DocumentKind, number: &str) -> String {
    format!("{}-{}", kind.slug(), number.trim().replace('/', "-"))
}

/// Name of the exported PDF: `invoice-INV-202501-17.pdf`.
///
/// ## Example
/// ```rust
/// use khata_core::document::export_file_name;
/// use khata_core::DocumentKind;
///
/// assert_eq!(
///     export_file_name(DocumentKind::Invoice, "INV-202501-17"),
///     "invoice-INV-202501-17.pdf"
/// );
/// ```
pub fn export_file_name(kind: DocumentKind, number: &str) -> String {
    format!("{}.pdf", export_file_stem(kind, number))
}

// =============================================================================
// Header & Footer Blocks
// =============================================================================

/// What the top of a page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum HeaderBlock {
    #[serde(rename_all = "camelCase")]
    Full {
        kind: DocumentKind,
        number: String,
        issue_date: NaiveDate,
        due_date: Option<NaiveDate>,
        biller: Party,
        client: Party,
    },
    #[serde(rename_all = "camelCase")]
    Continuation { kind: DocumentKind, number: String },
}

/// What the bottom of a page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FooterBlock {
    #[serde(rename_all = "camelCase")]
    Full {
        totals: DocumentTotals,
        tax_summary: Vec<TaxSlabSummary>,
        is_inter_state: bool,
        notes: Option<String>,
    },
    /// Sum of row amounts printed so far, carried to the next page.
    #[serde(rename_all = "camelCase")]
    Continuation { carried_sub_total: Money },
}

/// One page with its blocks resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    #[serde(flatten)]
    pub page: Page<ComputedLine>,
    pub header: HeaderBlock,
    pub footer: FooterBlock,
}

// =============================================================================
// Layout
// =============================================================================

/// A computed, paginated document ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLayout {
    pub kind: DocumentKind,
    pub number: String,
    /// Row capacity of every page; page `n` starts at row
    /// `(n - 1) * max_rows_per_page + 1`.
    pub max_rows_per_page: usize,
    /// Selects the CGST/SGST or IGST columns on every page.
    pub is_inter_state: bool,
    pub totals: DocumentTotals,
    pub pages: Vec<DocumentPage>,
}

impl DocumentLayout {
    /// Computes `document` and lays it out with `config`.
    ///
    /// ## Errors
    /// Only pagination errors; computing totals cannot fail.
    pub fn build(document: &BillingDocument, config: &PaginationConfig) -> CoreResult<Self> {
        let max_rows_per_page = config.max_rows_per_page()?;
        let computed = compute_document(document);
        let pages = paginate(&computed.lines, config)?;

        Ok(DocumentLayout::assemble(
            document,
            computed,
            pages,
            max_rows_per_page,
        ))
    }

    fn assemble(
        document: &BillingDocument,
        computed: ComputedDocument,
        pages: Vec<Page<ComputedLine>>,
        max_rows_per_page: usize,
    ) -> Self {
        let mut carried = Money::zero();

        let pages = pages
            .into_iter()
            .map(|page| {
                carried += page.rows.iter().map(|line| line.amount).sum::<Money>();

                let header = match page.header_variant {
                    BlockVariant::Full => HeaderBlock::Full {
                        kind: document.kind,
                        number: document.number.clone(),
                        issue_date: document.issue_date,
                        due_date: document.due_date,
                        biller: document.biller.clone(),
                        client: document.client.clone(),
                    },
                    BlockVariant::Continuation => HeaderBlock::Continuation {
                        kind: document.kind,
                        number: document.number.clone(),
                    },
                };

                let footer = match page.footer_variant {
                    BlockVariant::Full => FooterBlock::Full {
                        totals: computed.totals,
                        tax_summary: tax_breakdown(&computed.lines),
                        is_inter_state: computed.is_inter_state,
                        notes: document.notes.clone(),
                    },
                    BlockVariant::Continuation => FooterBlock::Continuation {
                        carried_sub_total: carried,
                    },
                };

                DocumentPage {
                    page,
                    header,
                    footer,
                }
            })
            .collect();

        DocumentLayout {
            kind: document.kind,
            number: document.number.clone(),
            max_rows_per_page,
            is_inter_state: computed.is_inter_state,
            totals: computed.totals,
            pages,
        }
    }

    /// `invoice-INV-202501-17`
    pub fn file_stem(&self) -> String {
        export_file_stem(self.kind, &self.number)
    }

    /// `invoice-INV-202501-17.pdf`
    pub fn file_name(&self) -> String {
        export_file_name(self.kind, &self.number)
    }

    /// Number of table rows across all pages.
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.page.rows.len()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, TaxRate};

    fn party(name: &str, state: &str) -> Party {
        Party {
            name: name.to_string(),
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
            biller: party("Sharma Steels", "Maharashtra"),
            client: party("Patel Builders", "Maharashtra"),
            items: (0..rows)
                .map(|i| {
                    LineItem::new(
                        format!("Item {i}"),
                        1,
                        Money::from_rupees(100),
                        TaxRate::from_percent(18),
                    )
                })
                .collect(),
            notes: Some("Thank you for your business".to_string()),
        }
    }

    fn ten_rows_per_page() -> PaginationConfig {
        PaginationConfig {
            page_height: 120.0,
            page_width: 100.0,
            margin: 5.0,
            estimated_header_height: 5.0,
            estimated_footer_height: 5.0,
            estimated_row_height: 10.0,
        }
    }

    #[test]
    fn test_document_number_format() {
        let number = DocumentNumber::new(DocumentKind::Quotation, 2025, 3, 4);
        assert_eq!(number.to_string(), "QUO-202503-4");

        let number = DocumentNumber::new(DocumentKind::Invoice, 2025, 1, 17);
        assert_eq!(number.to_string(), "INV-202501-17");
    }

    #[test]
    fn test_document_number_parse_rejects_bad_input() {
        for bad in ["", "INV", "INV-2025-1", "INV-202513-1", "BIL-202501-1", "INV-202501-", "INV-202501-1-2"] {
            assert!(bad.parse::<DocumentNumber>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(
            export_file_stem(DocumentKind::Quotation, "QUO-202501-3"),
            "quotation-QUO-202501-3"
        );
        assert_eq!(
            export_file_name(DocumentKind::Invoice, "2024-25/0042"),
            "invoice-2024-25-0042.pdf"
        );
    }

    #[test]
    fn test_layout_resolves_blocks() {
        let layout = DocumentLayout::build(&document(25), &ten_rows_per_page()).unwrap();

        assert_eq!(layout.max_rows_per_page, 10);
        assert_eq!(layout.pages.len(), 3);
        assert_eq!(layout.row_count(), 25);
        assert!(!layout.is_inter_state);
        assert!(matches!(layout.pages[0].header, HeaderBlock::Full { .. }));
        assert!(matches!(layout.pages[1].header, HeaderBlock::Continuation { .. }));
        assert!(matches!(layout.pages[2].footer, FooterBlock::Full { .. }));
        assert_eq!(layout.file_name(), "invoice-INV-202501-17.pdf");
    }

    #[test]
    fn test_continuation_footer_carries_running_sub_total() {
        let layout = DocumentLayout::build(&document(25), &ten_rows_per_page()).unwrap();

        let carried: Vec<Money> = layout
            .pages
            .iter()
            .filter_map(|p| match p.footer {
                FooterBlock::Continuation { carried_sub_total } => Some(carried_sub_total),
                FooterBlock::Full { .. } => None,
            })
            .collect();
        assert_eq!(carried, vec![Money::from_rupees(1000), Money::from_rupees(2000)]);

        match &layout.pages[2].footer {
            FooterBlock::Full { totals, tax_summary, notes, .. } => {
                assert_eq!(totals.sub_total, Money::from_rupees(2500));
                assert_eq!(totals.grand_total, Money::from_rupees(2950));
                assert_eq!(tax_summary.len(), 1);
                assert!(notes.is_some());
            }
            other => panic!("expected full footer, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_has_one_full_page() {
        let layout = DocumentLayout::build(&document(0), &ten_rows_per_page()).unwrap();
        assert_eq!(layout.pages.len(), 1);
        assert!(matches!(layout.pages[0].header, HeaderBlock::Full { .. }));
        assert!(matches!(layout.pages[0].footer, FooterBlock::Full { .. }));
        assert!(layout.totals.grand_total.is_zero());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut config = ten_rows_per_page();
        config.estimated_row_height = 500.0;
        let err = DocumentLayout::build(&document(3), &config).unwrap_err();
        assert!(matches!(err, CoreError::Pagination(_)));
    }
}
