use std::collections::HashMap;

use crate::modules::sales::models::{AggregateBucket, DimensionKey, GroupBy, SaleRecord};

/// Group records by a dimension key shape and sum quantity, sales, costs
/// and rebates per key.
///
/// Sums accumulate in ledger order and keys keep first-seen order, so
/// identical input always yields identical buckets.
pub fn aggregate(records: &[&SaleRecord], group_by: GroupBy) -> Vec<(DimensionKey, AggregateBucket)> {
    let mut order: Vec<DimensionKey> = Vec::new();
    let mut buckets: HashMap<DimensionKey, AggregateBucket> = HashMap::new();

    for record in records {
        let key = DimensionKey::for_record(record, group_by);
        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            AggregateBucket::default()
        });
        bucket.add(record);
    }

    order
        .into_iter()
        .map(|key| {
            let bucket = buckets.remove(&key).unwrap_or_default();
            (key, bucket)
        })
        .collect()
}
