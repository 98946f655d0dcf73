use chrono::{Datelike, NaiveDate};

use crate::core::{AppError, Result};
use crate::modules::sales::models::SaleRecord;

/// Inclusive date window for a report query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Parse `YYYY-MM-DD` bounds into a validated window.
    ///
    /// Unparseable or inverted bounds fail with `InvalidRange`.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| {
            AppError::invalid_range(format!("'{}' is not a valid date (expected YYYY-MM-DD)", start))
        })?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| {
            AppError::invalid_range(format!("'{}' is not a valid date (expected YYYY-MM-DD)", end))
        })?;

        if start > end {
            return Err(AppError::invalid_range(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        Ok(ReportWindow { start, end })
    }

    /// Window length in whole days
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The one-year window ending at this window's end date.
    ///
    /// The start is the same month/day one year earlier; Feb 29 rolls
    /// forward to Mar 1, matching calendar-date arithmetic upstream.
    pub fn trailing_year(&self) -> ReportWindow {
        let year = self.end.year() - 1;
        let start = NaiveDate::from_ymd_opt(year, self.end.month(), self.end.day())
            .unwrap_or_else(|| {
                // Only Feb 29 has no counterpart in the prior year
                NaiveDate::from_ymd_opt(year, 3, 1).unwrap()
            });
        ReportWindow {
            start,
            end: self.end,
        }
    }
}

/// Optional dimension-id restriction applied on top of a date window.
///
/// Each set has logical-OR semantics over its members; callers supply the
/// sets as hyphen-delimited id lists (`"1300-2091"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionFilter {
    pub customer_ids: Option<Vec<String>>,
    pub item_ids: Option<Vec<String>>,
}

impl DimensionFilter {
    pub fn none() -> Self {
        DimensionFilter::default()
    }

    /// Parse a hyphen-delimited customer-id list
    pub fn customers(cids: &str) -> Self {
        DimensionFilter {
            customer_ids: Some(split_id_list(cids)),
            item_ids: None,
        }
    }

    /// Parse a hyphen-delimited item-id list
    pub fn items(iids: &str) -> Self {
        DimensionFilter {
            customer_ids: None,
            item_ids: Some(split_id_list(iids)),
        }
    }

    /// Exact customer and item pairing
    pub fn customer_item(cid: &str, iid: &str) -> Self {
        DimensionFilter {
            customer_ids: Some(vec![cid.to_string()]),
            item_ids: Some(vec![iid.to_string()]),
        }
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        if let Some(cids) = &self.customer_ids {
            if !cids.iter().any(|c| c == &record.customer_id) {
                return false;
            }
        }
        if let Some(iids) = &self.item_ids {
            if !iids.iter().any(|i| i == &record.item_id) {
                return false;
            }
        }
        true
    }
}

fn split_id_list(ids: &str) -> Vec<String> {
    ids.split('-')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Select the subsequence of records inside the window that pass the filter,
/// preserving ledger order.
pub fn select<'a>(
    records: &'a [SaleRecord],
    window: &ReportWindow,
    filter: &DimensionFilter,
) -> Vec<&'a SaleRecord> {
    records
        .iter()
        .filter(|r| r.sale_date >= window.start && r.sale_date <= window.end)
        .filter(|r| filter.matches(r))
        .collect()
}
