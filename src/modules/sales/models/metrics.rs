use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::sales::models::DimensionKey;

/// Derived figures for a primary-window aggregate bucket.
///
/// Sign convention: `sales` and `rebates` are reported as summed;
/// `costs` and `current_trade_discounts` are reported negated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    pub quantity: Decimal,
    pub avg_price: Decimal,
    pub after_rebate_avg_price: Decimal,
    pub sales: Decimal,
    pub costs: Decimal,
    pub rebates: Decimal,
    pub current_trade_discounts: Decimal,
    pub gross_profit: Decimal,
    pub gross_profit_margin: Decimal,
}

/// Derived figures for a trailing-twelve-month view.
///
/// Average-price fields are not part of the trailing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingBreakdown {
    pub quantity: Decimal,
    pub sales: Decimal,
    pub costs: Decimal,
    pub rebates: Decimal,
    pub current_trade_discounts: Decimal,
    pub gross_profit: Decimal,
    pub gross_profit_margin: Decimal,
}

impl From<MetricBreakdown> for TrailingBreakdown {
    fn from(m: MetricBreakdown) -> Self {
        TrailingBreakdown {
            quantity: m.quantity,
            sales: m.sales,
            costs: m.costs,
            rebates: m.rebates,
            current_trade_discounts: m.current_trade_discounts,
            gross_profit: m.gross_profit,
            gross_profit_margin: m.gross_profit_margin,
        }
    }
}

/// One row of a grouped sales report: the dimension key, the primary-window
/// metrics, and the optional trailing-year views merged on that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReportEntry {
    pub key: DimensionKey,
    #[serde(flatten)]
    pub metrics: MetricBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_trailing_twelve_months: Option<TrailingBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_twelve_months: Option<TrailingBreakdown>,
}

/// Average sale price for one customer and item pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgPriceEntry {
    pub key: DimensionKey,
    pub quantity: Decimal,
    pub sales: Decimal,
    pub avg_sale_price: Decimal,
}
