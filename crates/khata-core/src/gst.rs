//! # GST Engine
//!
//! Turns line items plus jurisdiction into tax-compliant figures.
//!
//! ## Levy Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Which tax applies?                                 │
//! │                                                                         │
//! │  seller_state == buyer_state?                                           │
//! │       │                                                                 │
//! │       ├── yes (intra-state) ──► CGST = SGST = amount × rate/2           │
//! │       │                         IGST = 0                                │
//! │       │                                                                 │
//! │       └── no  (inter-state) ──► IGST = 2 × (amount × rate/2)            │
//! │                                 CGST = SGST = 0                         │
//! │                                                                         │
//! │  The choice is made once per document and applies to every row.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every figure is rounded to the nearest paisa, ties away from zero.
//! The half-rate levy is rounded once and used for both sides:
//! CGST = SGST = half, and IGST = half + half. A row therefore has the same
//! total tax, and a document the same grand total, whichever state the
//! buyer is in.
//!
//! ## Purity
//! Nothing here validates, clamps, or logs. A negative rate or quantity that
//! slipped past [`crate::validation`] produces negative figures.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{
    BillingDocument, ComputedDocument, ComputedLine, DocumentTotals, LineItem, TaxRate,
    TaxSlabSummary,
};

/// Returns `true` when seller and buyer are in different states.
///
/// Exact string inequality; no case folding or trimming.
///
/// ## Example
/// ```rust
/// use khata_core::gst::determine_inter_state;
///
/// assert!(!determine_inter_state("Maharashtra", "Maharashtra"));
/// assert!(determine_inter_state("Maharashtra", "Gujarat"));
/// ```
#[inline]
pub fn determine_inter_state(seller_state: &str, buyer_state: &str) -> bool {
    seller_state != buyer_state
}

/// Computes the tax breakdown of one row.
///
/// ## Example
/// ```rust
/// use khata_core::gst::compute_line_item;
/// use khata_core::{DiscountRate, LineItem, Money, TaxRate};
///
/// let item = LineItem::new("Cable", 2, Money::from_rupees(500), TaxRate::from_percent(18))
///     .with_discount(DiscountRate::from_percent(10));
///
/// let line = compute_line_item(&item, false);
/// assert_eq!(line.amount, Money::from_rupees(900));
/// assert_eq!(line.cgst, Money::from_rupees(81));
/// assert_eq!(line.sgst, Money::from_rupees(81));
/// assert_eq!(line.total_amount, Money::from_rupees(1062));
/// ```
pub fn compute_line_item(item: &LineItem, is_inter_state: bool) -> ComputedLine {
    let gross = item.rate.multiply_quantity(item.quantity);
    let amount = gross.apply_percentage_discount(item.discount.bps());

    let (cgst, sgst, igst) = split_tax(amount, item.tax_rate, is_inter_state);

    ComputedLine {
        item: item.clone(),
        amount,
        cgst,
        sgst,
        igst,
        total_amount: amount + cgst + sgst + igst,
    }
}

fn split_tax(amount: Money, rate: TaxRate, is_inter_state: bool) -> (Money, Money, Money) {
    let half = amount.half_percentage_of(rate.bps());
    if is_inter_state {
        (Money::zero(), Money::zero(), half + half)
    } else {
        (half, half, Money::zero())
    }
}

/// Computes every row of a document.
pub fn compute_lines(items: &[LineItem], is_inter_state: bool) -> Vec<ComputedLine> {
    items
        .iter()
        .map(|item| compute_line_item(item, is_inter_state))
        .collect()
}

/// Sums already-computed rows into document totals.
pub fn totals_of(lines: &[ComputedLine]) -> DocumentTotals {
    let mut sub_total = Money::zero();
    let mut cgst = Money::zero();
    let mut sgst = Money::zero();
    let mut igst = Money::zero();

    for line in lines {
        sub_total += line.amount;
        cgst += line.cgst;
        sgst += line.sgst;
        igst += line.igst;
    }

    DocumentTotals::from_components(sub_total, cgst, sgst, igst)
}

/// Computes document totals directly from line items.
///
/// An empty slice yields all-zero totals.
///
/// ## Example
/// ```rust
/// use khata_core::gst::compute_document_totals;
///
/// let totals = compute_document_totals(&[], true);
/// assert!(totals.grand_total.is_zero());
/// ```
pub fn compute_document_totals(items: &[LineItem], is_inter_state: bool) -> DocumentTotals {
    totals_of(&compute_lines(items, is_inter_state))
}

/// Recomputes a whole document from scratch.
///
/// Jurisdiction comes from `biller.state` and `client.state`. Call this
/// again after any edit; nothing is cached between calls.
pub fn compute_document(document: &BillingDocument) -> ComputedDocument {
    let is_inter_state = document.jurisdiction().is_inter_state();
    let lines = compute_lines(&document.items, is_inter_state);
    let totals = totals_of(&lines);

    ComputedDocument {
        lines,
        totals,
        is_inter_state,
    }
}

/// Groups computed rows by tax rate, lowest rate first.
pub fn tax_breakdown(lines: &[ComputedLine]) -> Vec<TaxSlabSummary> {
    let mut slabs: BTreeMap<TaxRate, TaxSlabSummary> = BTreeMap::new();

    for line in lines {
        let rate = line.item.tax_rate;
        let slab = slabs.entry(rate).or_insert_with(|| TaxSlabSummary {
            tax_rate: rate,
            taxable_amount: Money::zero(),
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: Money::zero(),
        });
        slab.taxable_amount += line.amount;
        slab.cgst += line.cgst;
        slab.sgst += line.sgst;
        slab.igst += line.igst;
    }

    slabs.into_values().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
