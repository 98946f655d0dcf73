// Trailing-year proration and re-expansion: sums scale down before
// derivation, the derived view scales back up, and margins are always
// recomputed rather than scaled.

use rust_decimal_macros::dec;

use salemetrics::sales::models::{AggregateBucket, DimensionKey, TrailingBreakdown};
use salemetrics::sales::services::trailing_window::{normalize_groups, prorate, reexpand};
use salemetrics::sales::services::{DiscountTable, ReportWindow};

fn customer_item_key(cid: &str, iid: &str) -> DimensionKey {
    DimensionKey {
        customer_id: Some(cid.to_string()),
        customer_name: Some(format!("customer {}", cid)),
        item_id: Some(iid.to_string()),
        item_name: Some(format!("item {}", iid)),
    }
}

#[test]
fn test_rebate_window_is_one_calendar_year() {
    let window = ReportWindow::parse("2025-06-01", "2025-06-30").unwrap();
    let trailing = window.trailing_year();

    assert_eq!(trailing.start.to_string(), "2024-06-30");
    assert_eq!(trailing.end, window.end);
    assert_eq!(trailing.num_days(), 365);
}

#[test]
fn test_rebate_window_spanning_a_leap_day_has_366_days() {
    let window = ReportWindow::parse("2024-06-01", "2024-06-30").unwrap();
    let trailing = window.trailing_year();

    assert_eq!(trailing.start.to_string(), "2023-06-30");
    assert_eq!(trailing.num_days(), 366);
}

#[test]
fn test_prorate_scales_sums_and_rounds_quantity() {
    let bucket = AggregateBucket {
        quantity: dec!(365),
        sales: dec!(730),
        costs: dec!(365),
        rebates: dec!(73),
    };

    let scaled = prorate(&bucket, 30, 365);

    assert_eq!(scaled.quantity, dec!(30));
    assert_eq!(scaled.sales, dec!(60));
    assert_eq!(scaled.costs, dec!(30));
    assert_eq!(scaled.rebates, dec!(6));
}

#[test]
fn test_prorated_quantity_rounds_to_whole() {
    let bucket = AggregateBucket {
        quantity: dec!(10),
        sales: dec!(0),
        costs: dec!(0),
        rebates: dec!(0),
    };

    // 10 * 30/365 = 0.8219... rounds to 1
    let scaled = prorate(&bucket, 30, 365);
    assert_eq!(scaled.quantity, dec!(1));
}

#[test]
fn test_normalize_derives_after_scaling() {
    let table = DiscountTable::new();
    let groups = vec![(
        customer_item_key("1300", "9"),
        AggregateBucket {
            quantity: dec!(3650),
            sales: dec!(36500),
            costs: dec!(18250),
            rebates: dec!(0),
        },
    )];

    let normalized = normalize_groups(&groups, &table, 30, 365);
    assert_eq!(normalized.len(), 1);

    let figures = &normalized[0].1;
    // scale 30/365: sales 3000, costs 1500
    assert_eq!(figures.quantity, dec!(300));
    assert_eq!(figures.sales, dec!(3000));
    assert_eq!(figures.costs, dec!(-1500));
    assert_eq!(figures.current_trade_discounts, dec!(-225));
    // 0 + (3000 - (225 + 1500))
    assert_eq!(figures.gross_profit, dec!(1275));
    assert_eq!(figures.gross_profit_margin, dec!(42.5));
}

#[test]
fn test_reexpand_rescales_and_recomputes_margin() {
    let normalized = TrailingBreakdown {
        quantity: dec!(30),
        sales: dec!(60),
        costs: dec!(-30),
        rebates: dec!(0),
        current_trade_discounts: dec!(0),
        gross_profit: dec!(30),
        gross_profit_margin: dec!(50),
    };

    let expanded = reexpand(&normalized, 30, 365);

    assert_eq!(expanded.quantity, dec!(365));
    assert_eq!(expanded.sales, dec!(730));
    assert_eq!(expanded.costs, dec!(-365));
    assert_eq!(expanded.gross_profit, dec!(365));
    // Ratio is recomputed on the expanded figures, not scaled
    assert_eq!(expanded.gross_profit_margin, dec!(50));
}

#[test]
fn test_reexpand_margin_guards_zero_sales() {
    let normalized = TrailingBreakdown {
        quantity: dec!(0),
        sales: dec!(0),
        costs: dec!(0),
        rebates: dec!(0),
        current_trade_discounts: dec!(0),
        gross_profit: dec!(0),
        gross_profit_margin: dec!(0),
    };

    let expanded = reexpand(&normalized, 30, 365);
    assert_eq!(expanded.gross_profit_margin, dec!(0));
}

#[test]
fn test_double_transform_round_trips_whole_figures() {
    let table = DiscountTable::new();
    let groups = vec![(
        customer_item_key("5555", "9"),
        AggregateBucket {
            quantity: dec!(365),
            sales: dec!(3650),
            costs: dec!(1825),
            rebates: dec!(365),
        },
    )];

    let normalized = normalize_groups(&groups, &table, 73, 365);
    let expanded = reexpand(&normalized[0].1, 73, 365);

    // Sums that scale without rounding residue come back exactly
    assert_eq!(expanded.quantity, dec!(365));
    assert_eq!(expanded.sales, dec!(3650));
    assert_eq!(expanded.costs, dec!(-1825));
    assert_eq!(expanded.rebates, dec!(365));

    let normalized_margin = normalized[0].1.gross_profit_margin;
    assert_eq!(expanded.gross_profit_margin, normalized_margin);
}

#[test]
fn test_trailing_window_over_leap_year_has_366_days() {
    let window = ReportWindow::parse("2024-05-01", "2024-05-31").unwrap();
    // 2023-05-31 .. 2024-05-31 spans Feb 29 2024
    assert_eq!(window.trailing_year().num_days(), 366);
}
