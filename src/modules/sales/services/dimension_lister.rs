use std::collections::BTreeSet;

use crate::modules::sales::models::SaleRecord;

/// Which ledger dimension to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Customer,
    Item,
}

/// Collect the distinct `"id|name"` identifiers present in a record
/// sequence, sorted lexicographically ascending.
///
/// Set semantics: duplicates collapse. An empty input yields an empty list.
pub fn distinct_identifiers(records: &[&SaleRecord], dimension: Dimension) -> Vec<String> {
    let set: BTreeSet<String> = records
        .iter()
        .map(|r| match dimension {
            Dimension::Customer => format!("{}|{}", r.customer_id, r.customer_name),
            Dimension::Item => format!("{}|{}", r.item_id, r.item_name),
        })
        .collect();

    set.into_iter().collect()
}
