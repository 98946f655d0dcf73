use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One immutable line item from the sales ledger.
///
/// Owned by the ledger store; the aggregation engine only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleRecord {
    pub sale_id: String,
    pub sale_date: NaiveDate,
    pub customer_id: String,
    pub customer_name: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    /// Signed currency; positive revenue
    pub sale_amount: Decimal,
    pub cost_amount: Decimal,
    pub rebate_credit: Decimal,
}
