pub mod dimension;
pub mod metrics;
pub mod sale_record;

pub use dimension::{AggregateBucket, DimensionKey, GroupBy};
pub use metrics::{AvgPriceEntry, MetricBreakdown, SalesReportEntry, TrailingBreakdown};
pub use sale_record::SaleRecord;
