//! # Quotation Cells
//!
//! Quotations can be built from a free-form table whose columns the user
//! defines (text, number, date or image). Only number cells carry money, and
//! only the column the caller names as the amount column is read.
//!
//! ## Conversion
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Item (text)  │ Photo (image)│ Needed (date)│ Price (num)  │
//! ├──────────────┼──────────────┼──────────────┼──────────────┤
//! │ "Site visit" │ https://...  │ 2025-01-20   │ 150000       │ ──► LineItem {
//! └──────────────┴──────────────┴──────────────┴──────────────┘       "Site visit",
//!                                                                      qty 1,
//!                                                                      rate ₹1,500.00 }
//! ```
//!
//! A cell of the wrong type is an error. Nothing is coerced: a text cell
//! reading `"1500"` in the amount column is rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, TaxRate};

/// The type of a column or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Text,
    Number,
    Date,
    Image,
}

/// One cell of a quotation table.
///
/// Serialized as `{ "type": "number", "value": 150000 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    Text(String),
    /// Numbers are kept in minor currency units (paise).
    Number(i64),
    Date(NaiveDate),
    /// Image URL.
    Image(String),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Text(_) => CellKind::Text,
            Cell::Number(_) => CellKind::Number,
            Cell::Date(_) => CellKind::Date,
            Cell::Image(_) => CellKind::Image,
        }
    }

    /// The cell's amount, if it is a number cell.
    pub fn as_amount(&self) -> Option<Money> {
        match self {
            Cell::Number(paise) => Some(Money::from_paise(*paise)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A user-defined column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColumnDef {
    pub label: String,
    pub kind: CellKind,
}

/// A quotation table: column definitions plus rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationTable {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Cell>>,
}

impl QuotationTable {
    /// Converts every row into an amount-only line item.
    ///
    /// ## Arguments
    /// * `description_column` - a `Text` column naming the row
    /// * `amount_column` - a `Number` column carrying the row amount
    /// * `tax_rate` - applied to every row
    ///
    /// ## Errors
    /// - [`CoreError::ColumnKindMismatch`] if a referenced column is declared
    ///   with the wrong kind
    /// - [`CoreError::CellKindMismatch`] if a row's cell has the wrong type or
    ///   is missing
    ///
    /// ## Example
    /// ```rust
    /// use khata_core::cells::{Cell, CellKind, ColumnDef, QuotationTable};
    /// use khata_core::{Money, TaxRate};
    ///
    /// let table = QuotationTable {
    ///     columns: vec![
    ///         ColumnDef { label: "Item".into(), kind: CellKind::Text },
    ///         ColumnDef { label: "Price".into(), kind: CellKind::Number },
    ///     ],
    ///     rows: vec![vec![Cell::Text("Site visit".into()), Cell::Number(150_000)]],
    /// };
    ///
    /// let items = table.to_line_items(0, 1, TaxRate::from_percent(18)).unwrap();
    /// assert_eq!(items[0].rate, Money::from_rupees(1500));
    /// assert_eq!(items[0].quantity, 1);
    /// ```
    pub fn to_line_items(
        &self,
        description_column: usize,
        amount_column: usize,
        tax_rate: TaxRate,
    ) -> CoreResult<Vec<LineItem>> {
        self.expect_column(description_column, CellKind::Text)?;
        self.expect_column(amount_column, CellKind::Number)?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let name = text_at(cells, row, description_column)?;
                let amount = amount_at(cells, row, amount_column)?;
                Ok(LineItem::amount_only(name, amount, tax_rate))
            })
            .collect()
    }

    fn expect_column(&self, column: usize, expected: CellKind) -> CoreResult<()> {
        let def = self.columns.get(column).ok_or(CoreError::UnknownColumn {
            column,
            columns: self.columns.len(),
        })?;

        if def.kind != expected {
            return Err(CoreError::ColumnKindMismatch {
                column,
                label: def.label.clone(),
                expected,
                found: def.kind,
            });
        }

        Ok(())
    }
}

fn text_at(cells: &[Cell], row: usize, column: usize) -> CoreResult<&str> {
    match cells.get(column) {
        Some(Cell::Text(text)) => Ok(text),
        other => Err(mismatch(row, column, CellKind::Text, other)),
    }
}

fn amount_at(cells: &[Cell], row: usize, column: usize) -> CoreResult<Money> {
    match cells.get(column) {
        Some(Cell::Number(paise)) => Ok(Money::from_paise(*paise)),
        other => Err(mismatch(row, column, CellKind::Number, other)),
    }
}

fn mismatch(row: usize, column: usize, expected: CellKind, found: Option<&Cell>) -> CoreError {
    CoreError::CellKindMismatch {
        row,
        column,
        expected,
        found: found.map(Cell::kind),
    }
}
