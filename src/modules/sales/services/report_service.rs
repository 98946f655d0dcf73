use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::rounding::round_currency;
use crate::core::Result;
use crate::modules::sales::models::{
    AvgPriceEntry, GroupBy, MetricBreakdown, SaleRecord, SalesReportEntry,
};
use crate::modules::sales::repositories::SalesRepository;
use crate::modules::sales::services::dimension_lister::{self, Dimension};
use crate::modules::sales::services::discount_table::DiscountTable;
use crate::modules::sales::services::ledger_filter::{DimensionFilter, ReportWindow};
use crate::modules::sales::services::{aggregator, metric_deriver, trailing_window};

/// Orchestrates the sales metrics aggregation pipeline.
///
/// Every report runs against a snapshot-style read of the ledger: the
/// primary window and the trailing rebate window are fetched concurrently,
/// then all grouping and derivation is synchronous pure computation. A
/// failure of either read aborts the whole report.
pub struct SalesReportService<R: SalesRepository> {
    repo: R,
    discounts: DiscountTable,
}

impl<R: SalesRepository> SalesReportService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            discounts: DiscountTable::new(),
        }
    }

    /// Raw ledger listing for a window, in ledger order
    pub async fn sales_in_window(&self, start: &str, end: &str) -> Result<Vec<SaleRecord>> {
        let window = ReportWindow::parse(start, end)?;
        self.repo
            .query_by_date_range(&window, &DimensionFilter::none())
            .await
    }

    /// Per-customer summary across every customer in the window
    pub async fn summary_all_customers(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<SalesReportEntry>> {
        self.grouped_report(start, end, DimensionFilter::none(), GroupBy::Customer)
            .await
    }

    /// Per-customer summary restricted to a hyphen-delimited customer-id set
    pub async fn summary_by_customer_set(
        &self,
        start: &str,
        end: &str,
        cids: &str,
    ) -> Result<Vec<SalesReportEntry>> {
        self.grouped_report(start, end, DimensionFilter::customers(cids), GroupBy::Customer)
            .await
    }

    /// Per-item summary across every item in the window
    pub async fn summary_all_items(&self, start: &str, end: &str) -> Result<Vec<SalesReportEntry>> {
        self.item_report(start, end, DimensionFilter::none()).await
    }

    /// Per-item summary restricted to a hyphen-delimited item-id set
    pub async fn summary_by_item_set(
        &self,
        start: &str,
        end: &str,
        iids: &str,
    ) -> Result<Vec<SalesReportEntry>> {
        self.item_report(start, end, DimensionFilter::items(iids)).await
    }

    /// Customer+item breakdown for a customer-id set
    pub async fn sales_by_customer_set(
        &self,
        start: &str,
        end: &str,
        cids: &str,
    ) -> Result<Vec<SalesReportEntry>> {
        self.grouped_report(
            start,
            end,
            DimensionFilter::customers(cids),
            GroupBy::CustomerItem,
        )
        .await
    }

    /// Customer+item breakdown for an item-id set
    pub async fn sales_by_item_set(
        &self,
        start: &str,
        end: &str,
        iids: &str,
    ) -> Result<Vec<SalesReportEntry>> {
        self.grouped_report(start, end, DimensionFilter::items(iids), GroupBy::CustomerItem)
            .await
    }

    /// Sorted, deduplicated `"id|name"` customer identifiers in a window
    pub async fn distinct_customers(&self, start: &str, end: &str) -> Result<Vec<String>> {
        self.distinct_dimension(start, end, Dimension::Customer).await
    }

    /// Sorted, deduplicated `"id|name"` item identifiers in a window
    pub async fn distinct_items(&self, start: &str, end: &str) -> Result<Vec<String>> {
        self.distinct_dimension(start, end, Dimension::Item).await
    }

    /// Average sale price for one customer and item pairing
    pub async fn avg_price(
        &self,
        start: &str,
        end: &str,
        cid: &str,
        iid: &str,
    ) -> Result<Vec<AvgPriceEntry>> {
        let window = ReportWindow::parse(start, end)?;
        let filter = DimensionFilter::customer_item(cid, iid);
        let records = self.repo.query_by_date_range(&window, &filter).await?;
        let refs: Vec<&SaleRecord> = records.iter().collect();

        let entries = aggregator::aggregate(&refs, GroupBy::CustomerItem)
            .into_iter()
            .map(|(key, bucket)| {
                let sales = round_currency(bucket.sales);
                let avg_sale_price = if sales > Decimal::ZERO && !bucket.quantity.is_zero() {
                    round_currency(sales / bucket.quantity)
                } else {
                    Decimal::ZERO
                };
                AvgPriceEntry {
                    key,
                    quantity: bucket.quantity,
                    sales,
                    avg_sale_price,
                }
            })
            .collect();

        Ok(entries)
    }

    async fn distinct_dimension(
        &self,
        start: &str,
        end: &str,
        dimension: Dimension,
    ) -> Result<Vec<String>> {
        let window = ReportWindow::parse(start, end)?;
        let records = self
            .repo
            .query_by_date_range(&window, &DimensionFilter::none())
            .await?;
        let refs: Vec<&SaleRecord> = records.iter().collect();

        Ok(dimension_lister::distinct_identifiers(&refs, dimension))
    }

    /// Fetch the primary window and the trailing rebate window concurrently.
    async fn fetch_windows(
        &self,
        window: &ReportWindow,
        filter: &DimensionFilter,
    ) -> Result<(Vec<SaleRecord>, Vec<SaleRecord>)> {
        let trailing = window.trailing_year();
        let (primary, rebate) = tokio::try_join!(
            self.repo.query_by_date_range(window, filter),
            self.repo.query_by_date_range(&trailing, filter),
        )?;
        Ok((primary, rebate))
    }

    /// Report grouped by customer or by customer+item.
    ///
    /// Trade discounts resolve directly from the key's customer id; the
    /// trailing window is grouped by the same key shape and merged on the
    /// ids the key carries.
    async fn grouped_report(
        &self,
        start: &str,
        end: &str,
        filter: DimensionFilter,
        group_by: GroupBy,
    ) -> Result<Vec<SalesReportEntry>> {
        let window = ReportWindow::parse(start, end)?;
        let trailing = window.trailing_year();
        let num_days = window.num_days();
        let num_rebate_days = trailing.num_days();

        info!(
            start = %window.start,
            end = %window.end,
            rebate_start = %trailing.start,
            "generating grouped sales report"
        );

        let (primary, rebate) = self.fetch_windows(&window, &filter).await?;
        let primary_refs: Vec<&SaleRecord> = primary.iter().collect();
        let rebate_refs: Vec<&SaleRecord> = rebate.iter().collect();

        let groups = aggregator::aggregate(&primary_refs, group_by);
        debug!(
            primary_records = primary.len(),
            rebate_records = rebate.len(),
            groups = groups.len(),
            "aggregation complete"
        );

        // A zero-length primary window cannot be prorated against
        let normalized = if num_days > 0 && num_rebate_days > 0 {
            let rebate_groups = aggregator::aggregate(&rebate_refs, group_by);
            trailing_window::normalize_groups(
                &rebate_groups,
                &self.discounts,
                num_days,
                num_rebate_days,
            )
        } else {
            Vec::new()
        };

        let mut entries: Vec<SalesReportEntry> = groups
            .into_iter()
            .map(|(key, bucket)| {
                let metrics =
                    metric_deriver::derive(&bucket, key.customer_id.as_deref(), &self.discounts);
                let matched = normalized
                    .iter()
                    .find(|(trailing_key, _)| key.matches_ids(trailing_key))
                    .map(|(_, figures)| figures.clone());
                let trailing_twelve_months = matched
                    .as_ref()
                    .map(|figures| trailing_window::reexpand(figures, num_days, num_rebate_days));
                SalesReportEntry {
                    key,
                    metrics,
                    normalized_trailing_twelve_months: matched,
                    trailing_twelve_months,
                }
            })
            .collect();

        sort_by_sales_desc(&mut entries);
        Ok(entries)
    }

    /// Report grouped purely by item.
    ///
    /// Discounts are a customer-level contract, so each item entry takes its
    /// trade discounts from the first customer+item group carrying that item,
    /// in aggregation order; the trailing view attaches from the first
    /// matching customer+item group the same way.
    async fn item_report(
        &self,
        start: &str,
        end: &str,
        filter: DimensionFilter,
    ) -> Result<Vec<SalesReportEntry>> {
        let window = ReportWindow::parse(start, end)?;
        let trailing = window.trailing_year();
        let num_days = window.num_days();
        let num_rebate_days = trailing.num_days();

        info!(
            start = %window.start,
            end = %window.end,
            rebate_start = %trailing.start,
            "generating per-item sales report"
        );

        let (primary, rebate) = self.fetch_windows(&window, &filter).await?;
        let primary_refs: Vec<&SaleRecord> = primary.iter().collect();
        let rebate_refs: Vec<&SaleRecord> = rebate.iter().collect();

        // Customer+item granularity, in aggregation order
        let customer_item_groups = aggregator::aggregate(&primary_refs, GroupBy::CustomerItem);

        let normalized = if num_days > 0 && num_rebate_days > 0 {
            let rebate_groups = aggregator::aggregate(&rebate_refs, GroupBy::CustomerItem);
            trailing_window::normalize_groups(
                &rebate_groups,
                &self.discounts,
                num_days,
                num_rebate_days,
            )
        } else {
            Vec::new()
        };

        let mut entries: Vec<SalesReportEntry> = aggregator::aggregate(&primary_refs, GroupBy::Item)
            .into_iter()
            .map(|(key, bucket)| {
                let base = metric_deriver::derive(&bucket, None, &self.discounts);
                let item_discounts = customer_item_groups
                    .iter()
                    .find(|(ci_key, _)| key.matches_ids(ci_key))
                    .map(|(ci_key, ci_bucket)| {
                        let rate = ci_key
                            .customer_id
                            .as_deref()
                            .map(|cid| self.discounts.rate_for(cid))
                            .unwrap_or(Decimal::ZERO);
                        round_currency(ci_bucket.sales * rate)
                    })
                    .unwrap_or(Decimal::ZERO);
                let metrics = apply_item_discounts(base, item_discounts);

                let matched = normalized
                    .iter()
                    .find(|(trailing_key, _)| key.matches_ids(trailing_key))
                    .map(|(_, figures)| figures.clone());
                let trailing_twelve_months = matched
                    .as_ref()
                    .map(|figures| trailing_window::reexpand(figures, num_days, num_rebate_days));
                SalesReportEntry {
                    key,
                    metrics,
                    normalized_trailing_twelve_months: matched,
                    trailing_twelve_months,
                }
            })
            .collect();

        sort_by_sales_desc(&mut entries);
        Ok(entries)
    }
}

/// Fold a first-match customer discount into an item-level derivation.
///
/// The base derivation carries no discounts (item keys have no customer
/// id), so profit and margin are adjusted here, guarded the same way.
fn apply_item_discounts(mut base: MetricBreakdown, item_discounts: Decimal) -> MetricBreakdown {
    base.current_trade_discounts = -item_discounts;
    if base.sales > Decimal::ZERO {
        base.gross_profit -= item_discounts;
        base.gross_profit_margin =
            round_currency(base.gross_profit / base.sales * Decimal::ONE_HUNDRED);
    }
    base
}

fn sort_by_sales_desc(entries: &mut [SalesReportEntry]) {
    entries.sort_by(|a, b| b.metrics.sales.cmp(&a.metrics.sales));
}
