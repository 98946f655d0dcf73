use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::sales::models::SaleRecord;

/// Grouping granularity for an aggregation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Customer,
    Item,
    CustomerItem,
}

/// Grouping identity for one aggregate bucket.
///
/// Equality is structural over ids and display names, so duplicate names
/// under different ids form distinct groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

impl DimensionKey {
    pub fn for_record(record: &SaleRecord, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Customer => DimensionKey {
                customer_id: Some(record.customer_id.clone()),
                customer_name: Some(record.customer_name.clone()),
                item_id: None,
                item_name: None,
            },
            GroupBy::Item => DimensionKey {
                customer_id: None,
                customer_name: None,
                item_id: Some(record.item_id.clone()),
                item_name: Some(record.item_name.clone()),
            },
            GroupBy::CustomerItem => DimensionKey {
                customer_id: Some(record.customer_id.clone()),
                customer_name: Some(record.customer_name.clone()),
                item_id: Some(record.item_id.clone()),
                item_name: Some(record.item_name.clone()),
            },
        }
    }

    /// Loose match on the ids this key carries, used when attaching
    /// trailing-window sub-results to a primary-window entry.
    pub fn matches_ids(&self, other: &DimensionKey) -> bool {
        if let Some(cid) = &self.customer_id {
            if other.customer_id.as_deref() != Some(cid.as_str()) {
                return false;
            }
        }
        if let Some(iid) = &self.item_id {
            if other.item_id.as_deref() != Some(iid.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Per-key algebraic sums over the records sharing that key.
///
/// Request-local scratch state; quantity is a whole number for raw windows
/// but may be fractional after trailing-window proration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateBucket {
    pub quantity: Decimal,
    pub sales: Decimal,
    pub costs: Decimal,
    pub rebates: Decimal,
}

impl AggregateBucket {
    pub fn add(&mut self, record: &SaleRecord) {
        self.quantity += Decimal::from(record.quantity);
        self.sales += record.sale_amount;
        self.costs += record.cost_amount;
        self.rebates += record.rebate_credit;
    }
}
