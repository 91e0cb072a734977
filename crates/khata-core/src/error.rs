//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  khata-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input contract failures                        │
//! │  └── PaginationError  - Page geometry that cannot hold a single row    │
//! │                                                                         │
//! │  khata-cli errors (app)                                                │
//! │  └── CliError         - Config, I/O and JSON failures                  │
//! │                                                                         │
//! │  Flow: ValidationError / PaginationError → CoreError → CliError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, row, column)
//! 3. Errors are enum variants, never String
//! 4. The core returns errors; it never logs them

use thiserror::Error;

use crate::cells::CellKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quotation column used for amounts is not declared as a number column.
    #[error("Column {column} ({label}) is {found:?}, expected {expected:?}")]
    ColumnKindMismatch {
        column: usize,
        label: String,
        expected: CellKind,
        found: CellKind,
    },

    /// A quotation column index is past the end of the column list.
    #[error("Column {column} does not exist (table has {columns} columns)")]
    UnknownColumn { column: usize, columns: usize },

    /// A quotation cell does not carry the type its column requires.
    ///
    /// ## When This Occurs
    /// - A text cell sits in the amount column
    /// - A row is shorter than the referenced column (`found` is `None`)
    ///
    /// The cell is never coerced: `"1,200"` as text is rejected, not parsed.
    #[error("Row {row}, column {column}: expected {expected:?}, found {found:?}")]
    CellKindMismatch {
        row: usize,
        column: usize,
        expected: CellKind,
        found: Option<CellKind>,
    },

    /// A document number does not follow the `PREFIX-YYYYMM-SEQ` scheme.
    #[error("Invalid document number: {0}")]
    InvalidDocumentNumber(String),

    /// Pagination error (wraps PaginationError).
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a document doesn't meet the input contract.
/// The engine itself assumes validated input; these are raised by
/// [`crate::validation`] before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A line item failed validation; `index` is its 0-based row.
    #[error("Line item {index}: {source}")]
    LineItem {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

// =============================================================================
// Pagination Error
// =============================================================================

/// Page geometry errors.
///
/// Reported to the caller as-is; a bad configuration is never clamped
/// into a working one.
#[derive(Debug, Error, PartialEq)]
pub enum PaginationError {
    /// A dimension is zero, negative, or not a finite number.
    #[error("Pagination field {field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// The page leaves no room for a single table row.
    #[error(
        "Invalid pagination config: {available_mm}mm left for rows at {row_height_mm}mm per row"
    )]
    InvalidPaginationConfig {
        available_mm: f64,
        row_height_mm: f64,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CellKindMismatch {
            row: 2,
            column: 1,
            expected: CellKind::Number,
            found: Some(CellKind::Text),
        };
        assert_eq!(
            err.to_string(),
            "Row 2, column 1: expected Number, found Some(Text)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product_name".to_string(),
        };
        assert_eq!(err.to_string(), "product_name is required");

        let err = ValidationError::LineItem {
            index: 3,
            source: Box::new(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }),
        };
        assert_eq!(err.to_string(), "Line item 3: quantity must be positive");
    }

    #[test]
    fn test_pagination_error_message() {
        let err = PaginationError::InvalidPaginationConfig {
            available_mm: 5.0,
            row_height_mm: 8.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pagination config: 5mm left for rows at 8mm per row"
        );
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "client.state".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let page_err = PaginationError::NonPositive {
            field: "margin",
            value: 0.0,
        };
        let core_err: CoreError = page_err.into();
        assert!(matches!(core_err, CoreError::Pagination(_)));
    }
}
