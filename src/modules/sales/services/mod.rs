pub mod aggregator;
pub mod dimension_lister;
pub mod discount_table;
pub mod ledger_filter;
pub mod metric_deriver;
pub mod report_service;
pub mod trailing_window;

pub use discount_table::DiscountTable;
pub use ledger_filter::{DimensionFilter, ReportWindow};
pub use report_service::SalesReportService;
