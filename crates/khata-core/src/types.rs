//! # Domain Types
//!
//! Core domain types used throughout Khata.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ BillingDocument │   │    LineItem     │   │ ComputedLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind, number   │──►│  product_name   │──►│  amount         │       │
//! │  │  biller, client │   │  quantity, rate │   │  cgst/sgst/igst │       │
//! │  │  items          │   │  discount, tax  │   │  total_amount   │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                        ▼                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DiscountRate   │   │ DocumentTotals  │       │
//! │  │  bps (u32)      │   │  bps (u32)      │   │  sub_total      │       │
//! │  │  1800 = 18%     │   │  1000 = 10%     │   │  grand_total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived figures live only in [`ComputedLine`] and [`DocumentTotals`];
//! they are produced by [`crate::gst`] and never edited in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rates
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so every GST slab is an exact integer:
/// 5% = 500, 12% = 1200, 18% = 1800, 28% = 2800.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Half the rate, as printed in the CGST and SGST columns.
    #[inline]
    pub fn half_percentage(&self) -> f64 {
        self.0 as f64 / 200.0
    }

    /// Zero tax rate (exempt / nil-rated supplies).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Discount rate in basis points (1000 = 10% off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// For display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn none() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row as entered on the invoice or quotation form.
///
/// ## Input Contract
/// - `product_name` non-empty
/// - `quantity > 0`
/// - `rate >= 0`
/// - `discount` and `tax_rate` within 0-10000 bps
///
/// See [`crate::validation::validate_line_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product or service description.
    pub product_name: String,

    /// HSN (goods) or SAC (services) classification code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,

    /// Number of units.
    pub quantity: i64,

    /// Unit price in paise.
    pub rate: Money,

    /// Discount applied to `quantity × rate`.
    #[serde(default)]
    pub discount: DiscountRate,

    /// GST rate for this row.
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line item with no discount and no HSN code.
    pub fn new(product_name: impl Into<String>, quantity: i64, rate: Money, tax_rate: TaxRate) -> Self {
        LineItem {
            product_name: product_name.into(),
            hsn_code: None,
            quantity,
            rate,
            discount: DiscountRate::none(),
            tax_rate,
        }
    }

    /// Creates a row from a single amount (quantity fixed at 1).
    ///
    /// Used by the simplified quotation forms where each row carries only
    /// a description and an amount.
    pub fn amount_only(product_name: impl Into<String>, amount: Money, tax_rate: TaxRate) -> Self {
        LineItem::new(product_name, 1, amount, tax_rate)
    }

    /// Sets the discount (builder style).
    pub fn with_discount(mut self, discount: DiscountRate) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the HSN/SAC code (builder style).
    pub fn with_hsn_code(mut self, code: impl Into<String>) -> Self {
        self.hsn_code = Some(code.into());
        self
    }
}

// =============================================================================
// Jurisdiction
// =============================================================================

/// Seller and buyer states for one document.
///
/// ## Matching Rule
/// States are compared by exact, case-sensitive string equality.
/// `"Karnataka"` and `"karnataka"` are different states here; callers must
/// supply canonical state names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionContext {
    pub seller_state: String,
    pub buyer_state: String,
}

impl JurisdictionContext {
    pub fn new(seller_state: impl Into<String>, buyer_state: impl Into<String>) -> Self {
        JurisdictionContext {
            seller_state: seller_state.into(),
            buyer_state: buyer_state.into(),
        }
    }

    /// True when the supply crosses a state border (IGST applies).
    #[inline]
    pub fn is_inter_state(&self) -> bool {
        crate::gst::determine_inter_state(&self.seller_state, &self.buyer_state)
    }
}

// =============================================================================
// Computed Figures
// =============================================================================

/// The tax breakdown of one line item.
///
/// ## Invariants
/// - Intra-state: `cgst == sgst`, `igst == 0`
/// - Inter-state: `cgst == sgst == 0`
/// - `total_amount == amount + cgst + sgst + igst`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLine {
    /// The row as entered.
    pub item: LineItem,
    /// Taxable value: `quantity × rate` less discount.
    pub amount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    /// `amount` plus all tax.
    pub total_amount: Money,
}

impl ComputedLine {
    /// Total tax on this row.
    #[inline]
    pub fn tax(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

/// Aggregate figures for a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub sub_total: Money,
    #[serde(rename = "totalCGST")]
    pub total_cgst: Money,
    #[serde(rename = "totalSGST")]
    pub total_sgst: Money,
    #[serde(rename = "totalIGST")]
    pub total_igst: Money,
    pub grand_total: Money,
}

impl DocumentTotals {
    /// Builds totals from their components; `grand_total` is derived.
    pub fn from_components(sub_total: Money, total_cgst: Money, total_sgst: Money, total_igst: Money) -> Self {
        DocumentTotals {
            sub_total,
            total_cgst,
            total_sgst,
            total_igst,
            grand_total: sub_total + total_cgst + total_sgst + total_igst,
        }
    }

    /// All-zero totals (the empty document).
    pub fn zero() -> Self {
        DocumentTotals::default()
    }

    /// Total tax across all components.
    #[inline]
    pub fn total_tax(&self) -> Money {
        self.total_cgst + self.total_sgst + self.total_igst
    }
}

/// Component-wise addition.
impl Add for DocumentTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DocumentTotals::from_components(
            self.sub_total + other.sub_total,
            self.total_cgst + other.total_cgst,
            self.total_sgst + other.total_sgst,
            self.total_igst + other.total_igst,
        )
    }
}

impl Sum for DocumentTotals {
    fn sum<I: Iterator<Item = DocumentTotals>>(iter: I) -> Self {
        iter.fold(DocumentTotals::zero(), Add::add)
    }
}

/// Per-rate summary row ("tax summary" table on a GST invoice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlabSummary {
    pub tax_rate: TaxRate,
    pub taxable_amount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
}

impl TaxSlabSummary {
    #[inline]
    pub fn tax(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

// =============================================================================
// Documents
// =============================================================================

/// The two document types the application issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quotation,
}

impl DocumentKind {
    /// Lowercase name used in exported file names.
    pub const fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
        }
    }

    /// Prefix of document numbers (`INV-202501-17`).
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Quotation => "QUO",
        }
    }

    /// Title printed in the document header.
    pub const fn title(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Tax Invoice",
            DocumentKind::Quotation => "Quotation",
        }
    }
}

/// A business on either side of the document (biller or client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    /// Canonical state name, compared exactly for IGST vs CGST/SGST.
    pub state: String,
    /// GST identification number; unregistered clients have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
}

/// An invoice or quotation as supplied by the form layer.
///
/// The biller is passed in explicitly rather than read from the signed-in
/// user's settings, so computing a document depends on nothing but this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingDocument {
    pub kind: DocumentKind,
    /// Human-readable number, e.g. `INV-202501-17`.
    pub number: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub biller: Party,
    pub client: Party,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BillingDocument {
    /// Seller and buyer states of this document.
    pub fn jurisdiction(&self) -> JurisdictionContext {
        JurisdictionContext::new(self.biller.state.clone(), self.client.state.clone())
    }
}

/// Every line of a document with its tax breakdown, plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComputedDocument {
    pub lines: Vec<ComputedLine>,
    pub totals: DocumentTotals,
    pub is_inter_state: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percent() {
        let rate = TaxRate::from_percent(18);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
        assert!((rate.half_percentage() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_document_totals_add_recomputes_grand_total() {
        let a = DocumentTotals::from_components(
            Money::from_rupees(100),
            Money::from_rupees(9),
            Money::from_rupees(9),
            Money::zero(),
        );
        let b = DocumentTotals::from_components(
            Money::from_rupees(50),
            Money::from_rupees(3),
            Money::from_rupees(3),
            Money::zero(),
        );
        let sum = a + b;
        assert_eq!(sum.sub_total, Money::from_rupees(150));
        assert_eq!(sum.grand_total, Money::from_rupees(174));
        assert_eq!(sum.total_tax(), Money::from_rupees(24));
    }

    #[test]
    fn test_totals_wire_names() {
        let json = serde_json::to_value(DocumentTotals::zero()).unwrap();
        for key in ["subTotal", "totalCGST", "totalSGST", "totalIGST", "grandTotal"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_line_item_deserializes_with_defaults() {
        let item: LineItem = serde_json::from_str(
            r#"{"productName":"Widget","quantity":2,"rate":50000,"taxRate":1800}"#,
        )
        .unwrap();
        assert_eq!(item.discount, DiscountRate::none());
        assert_eq!(item.hsn_code, None);
        assert_eq!(item.rate, Money::from_rupees(500));
    }

    #[test]
    fn test_document_kind_names() {
        assert_eq!(DocumentKind::Invoice.slug(), "invoice");
        assert_eq!(DocumentKind::Quotation.number_prefix(), "QUO");
        let json = serde_json::to_string(&DocumentKind::Quotation).unwrap();
        assert_eq!(json, "\"quotation\"");
    }
}
