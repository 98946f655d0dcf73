use rust_decimal::Decimal;

use crate::core::rounding::{round_currency, round_quantity};
use crate::modules::sales::models::{
    AggregateBucket, DimensionKey, TrailingBreakdown,
};
use crate::modules::sales::services::discount_table::DiscountTable;
use crate::modules::sales::services::metric_deriver;

/// Prorate a trailing-year bucket down to the primary window's length.
///
/// Each raw sum is scaled by `num_days / num_rebate_days` before any
/// derivation; the scaled quantity is reported as a whole number.
pub fn prorate(bucket: &AggregateBucket, num_days: i64, num_rebate_days: i64) -> AggregateBucket {
    // Multiply before dividing so evenly-divisible sums scale exactly.
    let days = Decimal::from(num_days);
    let rebate_days = Decimal::from(num_rebate_days);
    AggregateBucket {
        quantity: round_quantity(bucket.quantity * days / rebate_days),
        sales: bucket.sales * days / rebate_days,
        costs: bucket.costs * days / rebate_days,
        rebates: bucket.rebates * days / rebate_days,
    }
}

/// Prorate and derive every trailing-window group.
///
/// The output answers "what would a window of the query's length look like
/// if it behaved like the trailing year", one entry per dimension key in
/// aggregation order.
pub fn normalize_groups(
    groups: &[(DimensionKey, AggregateBucket)],
    discounts: &DiscountTable,
    num_days: i64,
    num_rebate_days: i64,
) -> Vec<(DimensionKey, TrailingBreakdown)> {
    groups
        .iter()
        .map(|(key, bucket)| {
            let prorated = prorate(bucket, num_days, num_rebate_days);
            let derived =
                metric_deriver::derive(&prorated, key.customer_id.as_deref(), discounts);
            (key.clone(), TrailingBreakdown::from(derived))
        })
        .collect()
}

/// Re-expand normalized figures back toward full-year scale.
///
/// Every field is multiplied by the inverse proration scale except the
/// margin, which is recomputed from the re-expanded profit and sales.
pub fn reexpand(
    normalized: &TrailingBreakdown,
    num_days: i64,
    num_rebate_days: i64,
) -> TrailingBreakdown {
    // Multiply before dividing so evenly-divisible sums scale exactly.
    let days = Decimal::from(num_days);
    let rebate_days = Decimal::from(num_rebate_days);
    let sales = normalized.sales * rebate_days / days;
    let gross_profit = normalized.gross_profit * rebate_days / days;

    TrailingBreakdown {
        quantity: normalized.quantity * rebate_days / days,
        sales,
        costs: normalized.costs * rebate_days / days,
        rebates: normalized.rebates * rebate_days / days,
        current_trade_discounts: normalized.current_trade_discounts * rebate_days / days,
        gross_profit,
        gross_profit_margin: recompute_margin(gross_profit, sales),
    }
}

fn recompute_margin(gross_profit: Decimal, sales: Decimal) -> Decimal {
    if sales.is_zero() {
        Decimal::ZERO
    } else {
        round_currency(gross_profit / sales * Decimal::ONE_HUNDRED)
    }
}
