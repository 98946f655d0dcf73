use rust_decimal::Decimal;

use crate::core::rounding::round_currency;
use crate::modules::sales::models::{AggregateBucket, MetricBreakdown};
use crate::modules::sales::services::discount_table::DiscountTable;

/// Derive the reported metric fields from one aggregate bucket.
///
/// `sales`, `costs` and `rebates` are each rounded to 2 decimal places
/// exactly once, and the dependent figures are composed from the rounded
/// values so rounding error never compounds. All division-by-zero cases
/// yield 0. `costs` and `current_trade_discounts` come out negated.
pub fn derive(
    bucket: &AggregateBucket,
    customer_id: Option<&str>,
    discounts: &DiscountTable,
) -> MetricBreakdown {
    let sales = round_currency(bucket.sales);
    let costs = round_currency(bucket.costs);
    let rebates = round_currency(bucket.rebates);

    // Discount lookup only applies when the grouping carries a customer id
    let rate = customer_id
        .map(|cid| discounts.rate_for(cid))
        .unwrap_or(Decimal::ZERO);
    let trade_discounts = round_currency(bucket.sales * rate);

    let quantity = bucket.quantity;
    let has_sales = sales > Decimal::ZERO;

    let avg_price = if has_sales && !quantity.is_zero() {
        sales / quantity
    } else {
        Decimal::ZERO
    };
    let after_rebate_avg_price = if has_sales && !quantity.is_zero() {
        (sales + rebates) / quantity
    } else {
        Decimal::ZERO
    };

    let gross_profit = if has_sales {
        rebates + (sales - (trade_discounts + costs))
    } else {
        Decimal::ZERO
    };
    let gross_profit_margin = if has_sales {
        round_currency(gross_profit / sales * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    MetricBreakdown {
        quantity,
        avg_price,
        after_rebate_avg_price,
        sales,
        costs: -costs,
        rebates,
        current_trade_discounts: -trade_discounts,
        gross_profit,
        gross_profit_margin,
    }
}
