//! # khata-core: Pure Invoicing Logic for Khata
//!
//! This crate holds the GST totals engine and the document paginator as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Khata Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Forms / Import (validated BillingDocument)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ khata-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │    gst    │  │pagination │  │ document  │  │   │
//! │  │   │   Money   │  │ CGST/SGST │  │   Page    │  │  Header/  │  │   │
//! │  │   │  (paise)  │  │   IGST    │  │  slicing  │  │  Footer   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DocumentLayout                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             Renderer (khata-cli, browser, PDF writer)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Party, BillingDocument, totals)
//! - [`money`] - Money type with integer paise (no floating point!)
//! - [`gst`] - Tax & totals engine
//! - [`pagination`] - Page splitting
//! - [`document`] - Header/footer resolution, numbering, file names
//! - [`cells`] - Typed quotation table cells
//! - [`validation`] - Input contract checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same input = same output, no hidden state
//! 2. **Recompute, Don't Mutate**: Derived figures are rebuilt from the inputs
//! 3. **Integer Money**: All monetary values are paise (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::gst::compute_document_totals;
//! use khata_core::{DiscountRate, LineItem, Money, TaxRate};
//!
//! let items = vec![
//!     LineItem::new("Consulting", 1, Money::from_rupees(1000), TaxRate::from_percent(18)),
//!     LineItem::new("Cable", 2, Money::from_rupees(500), TaxRate::from_percent(18))
//!         .with_discount(DiscountRate::from_percent(10)),
//!     LineItem::new("Router", 1, Money::from_rupees(2000), TaxRate::from_percent(28)),
//! ];
//!
//! let totals = compute_document_totals(&items, false);
//! assert_eq!(totals.sub_total, Money::from_rupees(3900));
//! assert_eq!(totals.total_cgst, Money::from_rupees(451));
//! assert_eq!(totals.grand_total, Money::from_rupees(4802));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cells;
pub mod document;
pub mod error;
pub mod gst;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{DocumentLayout, DocumentPage, FooterBlock, HeaderBlock};
pub use error::{CoreError, CoreResult, PaginationError, ValidationError};
pub use money::Money;
pub use pagination::{BlockVariant, Page, PaginationConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on one document.
///
/// ## Business Reason
/// Keeps exports to a sensible number of pages; larger bills are split
/// into several invoices.
pub const MAX_LINE_ITEMS: usize = 500;

/// Maximum quantity on a single line item.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Maximum unit price on a single line item: ₹1,00,00,000.00.
///
/// ## Overflow Bound
/// A full document at the limits, `MAX_LINE_ITEMS` rows of
/// `MAX_QUANTITY × MAX_RATE` taxed at 100%, totals 10^18 paise, inside
/// `i64::MAX` (about 9.2 × 10^18).
pub const MAX_RATE: Money = Money::from_rupees(10_000_000);
