//! Whole-engine properties: totals additivity, tax split rules, and the
//! pagination partition, checked over generated documents and page setups.

use khata_core::gst::{compute_document_totals, compute_line_item};
use khata_core::pagination::{paginate, paginate_with_limit};
use khata_core::{
    BlockVariant, DiscountRate, DocumentTotals, LineItem, Money, PaginationConfig, TaxRate,
    MAX_QUANTITY, MAX_RATE,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

/// Any line item that passes validation.
fn line_item() -> impl Strategy<Value = LineItem> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,15}",
        1..=MAX_QUANTITY,
        0..=MAX_RATE.paise(),
        0_u32..=10_000,
        0_u32..=10_000,
    )
        .prop_map(|(name, quantity, rate, discount, tax)| {
            LineItem::new(name, quantity, Money::from_paise(rate), TaxRate::from_bps(tax))
                .with_discount(DiscountRate::from_bps(discount))
        })
}

/// A line item whose half-rate levy is at least one paisa.
///
/// At least ₹100 after a discount of at most 50%, taxed at 1% or more.
fn taxable_line_item() -> impl Strategy<Value = LineItem> {
    (
        1..=MAX_QUANTITY,
        10_000..=MAX_RATE.paise(),
        0_u32..=5_000,
        100_u32..=10_000,
    )
        .prop_map(|(quantity, rate, discount, tax)| {
            LineItem::new("Steel", quantity, Money::from_paise(rate), TaxRate::from_bps(tax))
                .with_discount(DiscountRate::from_bps(discount))
        })
}

fn line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item(), 0..40)
}

/// Page setups in whole millimetres, not all of which fit a row.
fn page_setup() -> impl Strategy<Value = PaginationConfig> {
    (100_u32..400, 1_u32..20, 1_u32..60, 1_u32..60, 1_u32..20).prop_map(
        |(height, margin, header, footer, row)| PaginationConfig {
            page_height: f64::from(height),
            page_width: 210.0,
            margin: f64::from(margin),
            estimated_header_height: f64::from(header),
            estimated_footer_height: f64::from(footer),
            estimated_row_height: f64::from(row),
        },
    )
}

/// Page setups whose row area falls short of one row by 1 mm or more.
fn cramped_page_setup() -> impl Strategy<Value = PaginationConfig> {
    (1_u32..20, 1_u32..60, 1_u32..60, 1_u32..20)
        .prop_flat_map(|(margin, header, footer, row)| (Just((margin, header, footer, row)), 1..=row))
        .prop_map(|((margin, header, footer, row), shortfall)| PaginationConfig {
            page_height: f64::from(2 * margin + header + footer + row - shortfall),
            page_width: 210.0,
            margin: f64::from(margin),
            estimated_header_height: f64::from(header),
            estimated_footer_height: f64::from(footer),
            estimated_row_height: f64::from(row),
        })
}

fn scenario_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Consulting", 1, Money::from_rupees(1000), TaxRate::from_percent(18)),
        LineItem::new("Cable", 2, Money::from_rupees(500), TaxRate::from_percent(18))
            .with_discount(DiscountRate::from_percent(10)),
        LineItem::new("Router", 1, Money::from_rupees(2000), TaxRate::from_percent(28)),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn totals_are_additive_over_concatenation(
        items in line_items(),
        split in any::<prop::sample::Index>(),
        inter_state in any::<bool>()
    ) {
        let split = split.index(items.len() + 1);
        let (a, b) = items.split_at(split);

        let whole = compute_document_totals(&items, inter_state);
        let parts = compute_document_totals(a, inter_state) + compute_document_totals(b, inter_state);
        prop_assert_eq!(whole, parts);
    }

    #[test]
    fn tax_split_is_exclusive(item in line_item()) {
        let intra = compute_line_item(&item, false);
        let inter = compute_line_item(&item, true);

        prop_assert_eq!(intra.igst, Money::zero());
        prop_assert_eq!(inter.cgst, Money::zero());
        prop_assert_eq!(inter.sgst, Money::zero());

        if item.tax_rate.is_zero() {
            prop_assert_eq!(intra.tax(), Money::zero());
            prop_assert_eq!(inter.tax(), Money::zero());
        }
    }

    #[test]
    fn taxable_rows_land_on_one_side_only(item in taxable_line_item()) {
        let intra = compute_line_item(&item, false);
        prop_assert!(intra.cgst.is_positive() && intra.sgst.is_positive());
        prop_assert!(intra.igst.is_zero());

        let inter = compute_line_item(&item, true);
        prop_assert!(inter.igst.is_positive());
        prop_assert!(inter.cgst.is_zero() && inter.sgst.is_zero());
    }

    #[test]
    fn cgst_always_equals_sgst(item in line_item()) {
        let line = compute_line_item(&item, false);
        prop_assert_eq!(line.cgst, line.sgst);
    }

    #[test]
    fn grand_total_identity_holds(items in line_items(), inter_state in any::<bool>()) {
        let t = compute_document_totals(&items, inter_state);
        prop_assert_eq!(t.grand_total, t.sub_total + t.total_cgst + t.total_sgst + t.total_igst);
    }

    #[test]
    fn grand_total_does_not_depend_on_jurisdiction(items in line_items()) {
        let intra = compute_document_totals(&items, false);
        let inter = compute_document_totals(&items, true);

        prop_assert_eq!(intra.sub_total, inter.sub_total);
        prop_assert_eq!(intra.total_cgst + intra.total_sgst, inter.total_igst);
        prop_assert_eq!(intra.grand_total, inter.grand_total);
    }

    #[test]
    fn same_input_same_output(items in line_items(), inter_state in any::<bool>()) {
        let first = compute_document_totals(&items, inter_state);
        prop_assert_eq!(compute_document_totals(&items, inter_state), first);
    }

    #[test]
    fn pagination_partitions_rows_in_order(n in 0_usize..200, max_rows in 1_usize..50) {
        let rows: Vec<usize> = (0..n).collect();
        let pages = paginate_with_limit(&rows, max_rows).unwrap();

        let rejoined: Vec<usize> = pages.iter().flat_map(|p| p.rows.iter().copied()).collect();
        prop_assert_eq!(rejoined, rows);
        prop_assert!(pages.iter().all(|p| p.rows.len() <= max_rows));
    }

    #[test]
    fn pagination_page_count(n in 0_usize..200, max_rows in 1_usize..50) {
        let rows = vec![(); n];
        let pages = paginate_with_limit(&rows, max_rows).unwrap();
        let expected = usize::max(1, n.div_ceil(max_rows));

        prop_assert_eq!(pages.len(), expected);
        prop_assert!(pages.iter().all(|p| p.total_pages == expected));
    }

    #[test]
    fn pagination_numbers_and_variants(n in 0_usize..200, max_rows in 1_usize..50) {
        let rows: Vec<usize> = (0..n).collect();
        let pages = paginate_with_limit(&rows, max_rows).unwrap();
        let last = pages.len() - 1;

        for (i, page) in pages.iter().enumerate() {
            prop_assert_eq!(page.page_number, i + 1);
            prop_assert_eq!(page.is_first, i == 0);
            prop_assert_eq!(page.is_last, i == last);

            let header = if i == 0 { BlockVariant::Full } else { BlockVariant::Continuation };
            let footer = if i == last { BlockVariant::Full } else { BlockVariant::Continuation };
            prop_assert_eq!(page.header_variant, header);
            prop_assert_eq!(page.footer_variant, footer);
        }
    }

    #[test]
    fn paginate_uses_the_configured_row_limit(config in page_setup(), n in 0_usize..200) {
        let max_rows = config.max_rows_per_page();
        prop_assume!(max_rows.is_ok());
        let max_rows = max_rows.unwrap();

        let expected = config.row_area_height() / config.estimated_row_height;
        prop_assert_eq!(max_rows, expected.floor() as usize);

        let rows: Vec<usize> = (0..n).collect();
        prop_assert_eq!(paginate(&rows, &config).unwrap(), paginate_with_limit(&rows, max_rows).unwrap());
    }

    #[test]
    fn setups_without_room_for_a_row_are_rejected(config in cramped_page_setup(), n in 0_usize..20) {
        prop_assert!(config.max_rows_per_page().is_err());

        let rows = vec![(); n];
        prop_assert!(paginate(&rows, &config).is_err());
    }
}

#[test]
fn empty_document_totals_are_zero() {
    assert_eq!(compute_document_totals(&[], false), DocumentTotals::zero());
    assert_eq!(compute_document_totals(&[], true), DocumentTotals::zero());
}

#[test]
fn intra_state_scenario() {
    let totals = compute_document_totals(&scenario_items(), false);

    assert_eq!(totals.sub_total, Money::from_rupees(3900));
    assert_eq!(totals.total_cgst, Money::from_rupees(451));
    assert_eq!(totals.total_sgst, Money::from_rupees(451));
    assert_eq!(totals.total_igst, Money::zero());
    assert_eq!(totals.grand_total, Money::from_rupees(4802));
}

#[test]
fn inter_state_scenario_keeps_grand_total() {
    let totals = compute_document_totals(&scenario_items(), true);

    assert_eq!(totals.total_igst, Money::from_rupees(902));
    assert_eq!(totals.total_cgst, Money::zero());
    assert_eq!(totals.total_sgst, Money::zero());
    assert_eq!(totals.grand_total, Money::from_rupees(4802));
}

#[test]
fn twenty_five_rows_at_ten_per_page() {
    // (160 - 2×5 - 25 - 25) / 10 = 10 rows per page
    let config = PaginationConfig {
        page_height: 160.0,
        page_width: 110.0,
        margin: 5.0,
        estimated_header_height: 25.0,
        estimated_footer_height: 25.0,
        estimated_row_height: 10.0,
    };
    let rows: Vec<u32> = (1..=25).collect();
    let pages = paginate(&rows, &config).unwrap();

    let counts: Vec<usize> = pages.iter().map(|p| p.rows.len()).collect();
    assert_eq!(counts, vec![10, 10, 5]);

    let headers: Vec<BlockVariant> = pages.iter().map(|p| p.header_variant).collect();
    assert_eq!(
        headers,
        vec![BlockVariant::Full, BlockVariant::Continuation, BlockVariant::Continuation]
    );

    let footers: Vec<BlockVariant> = pages.iter().map(|p| p.footer_variant).collect();
    assert_eq!(
        footers,
        vec![BlockVariant::Continuation, BlockVariant::Continuation, BlockVariant::Full]
    );
}
