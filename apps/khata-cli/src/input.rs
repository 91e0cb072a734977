//! Reading documents from JSON.
//!
//! A document file is a `BillingDocument` in camelCase JSON. Quotations may
//! instead (or additionally) carry a typed `table`, whose rows are appended
//! to `items` as amount-only line items.
//!
//! ```json
//! {
//!   "kind": "quotation",
//!   "number": "QUO-202501-3",
//!   "issueDate": "2025-01-15",
//!   "biller": { "name": "Sharma Steels", "state": "Maharashtra" },
//!   "client": { "name": "Patel Builders", "state": "Gujarat" },
//!   "table": {
//!     "columns": [{ "label": "Item", "kind": "text" }, { "label": "Price", "kind": "number" }],
//!     "rows": [[{ "type": "text", "value": "Site visit" }, { "type": "number", "value": 150000 }]],
//!     "descriptionColumn": 0,
//!     "amountColumn": 1,
//!     "taxRate": 1800
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use khata_core::cells::QuotationTable;
use khata_core::validation::validate_document;
use khata_core::{BillingDocument, TaxRate};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile {
    #[serde(flatten)]
    document: BillingDocument,
    #[serde(default)]
    table: Option<TableInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableInput {
    #[serde(flatten)]
    table: QuotationTable,
    description_column: usize,
    amount_column: usize,
    tax_rate: TaxRate,
}

/// Parses and validates a document from JSON text.
pub fn parse_document(json: &str) -> CliResult<BillingDocument> {
    let file: DocumentFile = serde_json::from_str(json)?;
    let mut document = file.document;

    if let Some(input) = file.table {
        let items = input
            .table
            .to_line_items(input.description_column, input.amount_column, input.tax_rate)?;
        debug!(rows = items.len(), "Converted quotation table rows");
        document.items.extend(items);
    }

    validate_document(&document)?;
    Ok(document)
}

/// Reads, parses and validates a document file.
pub fn read_document(path: &Path) -> CliResult<BillingDocument> {
    let json = fs::read_to_string(path).map_err(|e| CliError::io("Failed to read", path, e))?;
    let document = parse_document(&json)?;

    debug!(
        path = %path.display(),
        number = %document.number,
        items = document.items.len(),
        "Document loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use khata_core::{DocumentKind, Money};

    const INVOICE: &str = r#"{
        "kind": "invoice",
        "number": "INV-202501-17",
        "issueDate": "2025-01-15",
        "biller": { "name": "Sharma Steels", "state": "Maharashtra", "gstin": "27AAPFU0939F1ZV" },
        "client": { "name": "Patel Builders", "state": "Maharashtra" },
        "items": [
            { "productName": "TMT bar", "hsnCode": "7214", "quantity": 2, "rate": 50000, "discount": 1000, "taxRate": 1800 }
        ]
    }"#;

    #[test]
    fn test_parse_invoice() {
        let document = parse_document(INVOICE).unwrap();
        assert_eq!(document.kind, DocumentKind::Invoice);
        assert_eq!(document.items.len(), 1);
        assert_eq!(document.items[0].hsn_code.as_deref(), Some("7214"));
        assert!(!document.jurisdiction().is_inter_state());
    }

    #[test]
    fn test_parse_quotation_table() {
        let json = r#"{
            "kind": "quotation",
            "number": "QUO-202501-3",
            "issueDate": "2025-01-15",
            "biller": { "name": "Sharma Steels", "state": "Maharashtra" },
            "client": { "name": "Patel Builders", "state": "Gujarat" },
            "table": {
                "columns": [{ "label": "Item", "kind": "text" }, { "label": "Price", "kind": "number" }],
                "rows": [[{ "type": "text", "value": "Site visit" }, { "type": "number", "value": 150000 }]],
                "descriptionColumn": 0,
                "amountColumn": 1,
                "taxRate": 1800
            }
        }"#;

        let document = parse_document(json).unwrap();
        assert_eq!(document.items.len(), 1);
        assert_eq!(document.items[0].rate, Money::from_rupees(1500));
        assert_eq!(document.items[0].quantity, 1);
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let json = INVOICE.replace(r#""quantity": 2"#, r#""quantity": 0"#);
        assert!(matches!(parse_document(&json), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_demo_documents_parse() {
        let invoice = parse_document(include_str!("../../../demos/invoice.json")).unwrap();
        assert!(invoice.jurisdiction().is_inter_state());
        assert_eq!(invoice.items.len(), 3);

        let quotation = parse_document(include_str!("../../../demos/quotation.json")).unwrap();
        assert_eq!(quotation.kind, DocumentKind::Quotation);
        assert_eq!(quotation.items[1].rate, Money::from_paise(2_450_050));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(parse_document("{"), Err(CliError::Json(_))));
    }
}
