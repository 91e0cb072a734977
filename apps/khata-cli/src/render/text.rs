//! Fixed-width text pages.
//!
//! ```text
//! TAX INVOICE                                               INV-202501-17
//! Issue date: 2025-01-15
//! From: Sharma Steels, Maharashtra (GSTIN 27AAPFU0939F1ZV)
//! To:   Patel Builders, Maharashtra
//! -----------------------------------------------------------------------
//!   #  Item                 HSN     Qty         Rate  Disc ...
//! -----------------------------------------------------------------------
//!   1  TMT bar              7214      2      ₹500.00  10%  ...
//! -----------------------------------------------------------------------
//! Carried forward                                                ₹900.00
//!                                                            Page 1 of 2
//! ```

use std::fmt::Write as _;

use khata_core::{
    ComputedLine, DocumentLayout, DocumentPage, DocumentTotals, FooterBlock, HeaderBlock, Money,
    Party, TaxSlabSummary,
};

use crate::error::{CliError, CliResult};
use crate::export::PageRenderer;

const ITEM_WIDTH: usize = 20;
const MONEY_WIDTH: usize = 13;
const FORM_FEED: char = '\u{000C}';

/// Renders pages as plain text separated by form feeds.
#[derive(Debug, Default)]
pub struct TextRenderer {
    pages: Vec<String>,
}

impl PageRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render_page(&mut self, layout: &DocumentLayout, page: &DocumentPage) -> CliResult<()> {
        let mut out = String::new();
        write_page(&mut out, layout, page).map_err(|e| CliError::Render {
            page: page.page.page_number,
            reason: e.to_string(),
        })?;
        self.pages.push(out);
        Ok(())
    }

    fn assemble(&mut self, _layout: &DocumentLayout) -> CliResult<Vec<u8>> {
        let separator = format!("{FORM_FEED}\n");
        Ok(self.pages.join(&separator).into_bytes())
    }
}

fn write_page(out: &mut String, layout: &DocumentLayout, page: &DocumentPage) -> std::fmt::Result {
    let width = table_width(layout.is_inter_state);
    let rule = "-".repeat(width);

    write_header(out, &page.header, width)?;
    writeln!(out, "{rule}")?;
    write_column_titles(out, layout.is_inter_state)?;
    writeln!(out, "{rule}")?;

    let first_row = (page.page.page_number - 1) * layout.max_rows_per_page + 1;
    for (offset, line) in page.page.rows.iter().enumerate() {
        write_row(out, first_row + offset, line, layout.is_inter_state)?;
    }

    writeln!(out, "{rule}")?;
    write_footer(out, &page.footer, width)?;
    writeln!(
        out,
        "{:>width$}",
        format!("Page {} of {}", page.page.page_number, page.page.total_pages)
    )
}

fn table_width(is_inter_state: bool) -> usize {
    // #, item, hsn, qty, disc, then the money columns
    let fixed = 3 + 2 + ITEM_WIDTH + 1 + 8 + 1 + 6 + 1 + 5;
    let money_columns = if is_inter_state { 4 } else { 5 };
    fixed + money_columns * (MONEY_WIDTH + 1)
}

fn write_header(out: &mut String, header: &HeaderBlock, width: usize) -> std::fmt::Result {
    match header {
        HeaderBlock::Full {
            kind,
            number,
            issue_date,
            due_date,
            biller,
            client,
        } => {
            let title = kind.title().to_uppercase();
            let pad = width.saturating_sub(title.chars().count());
            writeln!(out, "{title}{number:>pad$}")?;
            match due_date {
                Some(due) => writeln!(out, "Issue date: {issue_date}    Due date: {due}")?,
                None => writeln!(out, "Issue date: {issue_date}")?,
            }
            write_party(out, "From:", biller)?;
            write_party(out, "To:  ", client)
        }
        HeaderBlock::Continuation { kind, number } => {
            writeln!(out, "{} {number} (continued)", kind.title())
        }
    }
}

fn write_party(out: &mut String, label: &str, party: &Party) -> std::fmt::Result {
    write!(out, "{label} {}, {}", party.name, party.state)?;
    if let Some(gstin) = &party.gstin {
        write!(out, " (GSTIN {gstin})")?;
    }
    writeln!(out)?;
    for line in &party.address_lines {
        writeln!(out, "      {line}")?;
    }
    Ok(())
}

fn write_column_titles(out: &mut String, is_inter_state: bool) -> std::fmt::Result {
    write!(
        out,
        "{:>3}  {:<iw$} {:<8} {:>6} {:>mw$} {:>5} {:>mw$}",
        "#",
        "Item",
        "HSN",
        "Qty",
        "Rate",
        "Disc",
        "Taxable",
        iw = ITEM_WIDTH,
        mw = MONEY_WIDTH,
    )?;
    if is_inter_state {
        write!(out, " {:>mw$}", "IGST", mw = MONEY_WIDTH)?;
    } else {
        write!(out, " {:>mw$} {:>mw$}", "CGST", "SGST", mw = MONEY_WIDTH)?;
    }
    writeln!(out, " {:>mw$}", "Total", mw = MONEY_WIDTH)
}

fn write_row(out: &mut String, row_number: usize, line: &ComputedLine, is_inter_state: bool) -> std::fmt::Result {
    let item = &line.item;
    let name: String = item.product_name.chars().take(ITEM_WIDTH).collect();
    let hsn = item.hsn_code.as_deref().unwrap_or("");

    write!(
        out,
        "{:>3}  {:<iw$} {:<8} {:>6} {:>mw$} {:>5} {:>mw$}",
        row_number,
        name,
        hsn,
        item.quantity,
        item.rate.to_string(),
        format!("{}%", item.discount.percentage()),
        line.amount.to_string(),
        iw = ITEM_WIDTH,
        mw = MONEY_WIDTH,
    )?;
    if is_inter_state {
        write!(out, " {:>mw$}", line.igst.to_string(), mw = MONEY_WIDTH)?;
    } else {
        write!(
            out,
            " {:>mw$} {:>mw$}",
            line.cgst.to_string(),
            line.sgst.to_string(),
            mw = MONEY_WIDTH
        )?;
    }
    writeln!(out, " {:>mw$}", line.total_amount.to_string(), mw = MONEY_WIDTH)
}

fn write_footer(out: &mut String, footer: &FooterBlock, width: usize) -> std::fmt::Result {
    match footer {
        FooterBlock::Continuation { carried_sub_total } => {
            write_amount(out, "Carried forward", *carried_sub_total, width)
        }
        FooterBlock::Full {
            totals,
            tax_summary,
            is_inter_state,
            notes,
        } => {
            write_totals(out, totals, *is_inter_state, width)?;
            if !tax_summary.is_empty() {
                writeln!(out)?;
                writeln!(out, "Tax summary")?;
                for slab in tax_summary {
                    write_slab(out, slab, *is_inter_state)?;
                }
            }
            if let Some(notes) = notes {
                writeln!(out)?;
                writeln!(out, "Notes: {notes}")?;
            }
            Ok(())
        }
    }
}

fn write_totals(out: &mut String, totals: &DocumentTotals, is_inter_state: bool, width: usize) -> std::fmt::Result {
    write_amount(out, "Sub-total", totals.sub_total, width)?;
    if is_inter_state {
        write_amount(out, "IGST", totals.total_igst, width)?;
    } else {
        write_amount(out, "CGST", totals.total_cgst, width)?;
        write_amount(out, "SGST", totals.total_sgst, width)?;
    }
    write_amount(out, "Grand total", totals.grand_total, width)
}

fn write_slab(out: &mut String, slab: &TaxSlabSummary, is_inter_state: bool) -> std::fmt::Result {
    write!(
        out,
        "  {:>5}%  taxable {:>mw$}",
        slab.tax_rate.percentage(),
        slab.taxable_amount.to_string(),
        mw = MONEY_WIDTH
    )?;
    if is_inter_state {
        writeln!(out, "  IGST {:>mw$}", slab.igst.to_string(), mw = MONEY_WIDTH)
    } else {
        let half = slab.tax_rate.half_percentage();
        writeln!(
            out,
            "  CGST {half}% {:>mw$}  SGST {half}% {:>mw$}",
            slab.cgst.to_string(),
            slab.sgst.to_string(),
            mw = MONEY_WIDTH
        )
    }
}

fn write_amount(out: &mut String, label: &str, amount: Money, width: usize) -> std::fmt::Result {
    let pad = width.saturating_sub(label.chars().count());
    writeln!(out, "{label}{:>pad$}", amount.to_string())
}
