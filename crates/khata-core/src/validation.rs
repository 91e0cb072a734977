//! # Validation Module
//!
//! Input-contract checks for documents before they reach the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (browser)                                                │
//! │  ├── Schema checks, immediate user feedback                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Same rules, enforced for any caller (CLI, imports)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: gst / pagination                                              │
//! │  └── Assume valid input, never re-check                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use khata_core::validation::{validate_gstin, validate_quantity};
//!
//! validate_gstin("27AAPFU0939F1ZV").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BillingDocument, LineItem, Party};
use crate::{MAX_LINE_ITEMS, MAX_QUANTITY, MAX_RATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or service name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("product_name", name, 200)
}

/// Validates a party's state name.
///
/// Only emptiness and length are checked. Spelling and case are the
/// caller's responsibility: `"Tamil Nadu"` and `"tamil nadu"` both pass,
/// and are treated as different states by the engine.
pub fn validate_state(field: &str, state: &str) -> ValidationResult<()> {
    validate_text(field, state, 64)
}

/// Validates a document number.
///
/// ## Rules
/// - Must not be empty, at most 32 characters
/// - Only letters, digits, `-` and `/` (it becomes part of a file name)
pub fn validate_document_number(number: &str) -> ValidationResult<()> {
    validate_text("number", number, 32)?;

    if !number
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/')
    {
        return Err(ValidationError::InvalidFormat {
            field: "number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and slashes".to_string(),
        });
    }

    Ok(())
}

/// Validates a GSTIN (GST identification number).
///
/// ## Format
/// ```text
///  27  AAPFU 0939 F  1  Z  V
///  │     │    │   │  │  │  └─ check character (not verified)
///  │     │    │   │  │  └──── always 'Z'
///  │     │    │   │  └─────── entity number, 1-9 or A-Z
///  │     └────┴───┴────────── PAN: 5 letters, 4 digits, 1 letter
///  └───────────────────────── state code, 2 digits
/// ```
///
/// ## Example
/// ```rust
/// use khata_core::validation::validate_gstin;
///
/// assert!(validate_gstin("29ABCDE1234F1Z5").is_ok());
/// assert!(validate_gstin("29ABCDE1234F1X5").is_err());
/// ```
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "gstin".to_string(),
        reason: reason.to_string(),
    };

    let bytes = gstin.as_bytes();
    if bytes.len() != 15 {
        return Err(invalid("must be exactly 15 characters"));
    }

    if !bytes[0..2].iter().all(u8::is_ascii_digit) {
        return Err(invalid("must start with a 2-digit state code"));
    }

    let pan = &bytes[2..12];
    let pan_ok = pan[0..5].iter().all(u8::is_ascii_uppercase)
        && pan[5..9].iter().all(u8::is_ascii_digit)
        && pan[9].is_ascii_uppercase();
    if !pan_ok {
        return Err(invalid("characters 3-12 must be a PAN (AAAAA9999A)"));
    }

    let entity = bytes[12];
    if !(entity.is_ascii_uppercase() || (b'1'..=b'9').contains(&entity)) {
        return Err(invalid("character 13 must be 1-9 or A-Z"));
    }

    if bytes[13] != b'Z' {
        return Err(invalid("character 14 must be 'Z'"));
    }

    let check = bytes[14];
    if !(check.is_ascii_uppercase() || check.is_ascii_digit()) {
        return Err(invalid("character 15 must be a letter or digit"));
    }

    Ok(())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_RATE`], which keeps every validated document
///   within `i64` paise
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() || rate > MAX_RATE {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE.paise(),
        });
    }

    Ok(())
}

/// Validates a percentage in basis points (0% to 100%).
pub fn validate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates one line item against the full input contract.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_product_name(&item.product_name)?;
    validate_quantity(item.quantity)?;
    validate_rate(item.rate)?;
    validate_bps("discount", item.discount.bps())?;
    validate_bps("tax_rate", item.tax_rate.bps())?;
    Ok(())
}

/// Validates a biller or client.
///
/// `role` prefixes field names in errors (`"client.state is required"`).
pub fn validate_party(role: &str, party: &Party) -> ValidationResult<()> {
    validate_text(&format!("{role}.name"), &party.name, 200)?;
    validate_state(&format!("{role}.state"), &party.state)?;
    if let Some(gstin) = &party.gstin {
        validate_gstin(gstin)?;
    }
    Ok(())
}

/// Validates a whole document.
///
/// Line item failures carry the row index in [`ValidationError::LineItem`].
/// An empty item list is valid.
pub fn validate_document(document: &BillingDocument) -> ValidationResult<()> {
    validate_document_number(&document.number)?;
    validate_party("biller", &document.biller)?;
    validate_party("client", &document.client)?;
    validate_due_date(document.issue_date, document.due_date)?;

    if document.items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    for (index, item) in document.items.iter().enumerate() {
        validate_line_item(item).map_err(|source| ValidationError::LineItem {
            index,
            source: Box::new(source),
        })?;
    }

    Ok(())
}

fn validate_due_date(issue: NaiveDate, due: Option<NaiveDate>) -> ValidationResult<()> {
    match due {
        Some(due) if due < issue => Err(ValidationError::InvalidFormat {
            field: "due_date".to_string(),
            reason: "must not be before the issue date".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
