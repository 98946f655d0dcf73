use async_trait::async_trait;
use sqlx::{MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::sales::models::SaleRecord;
use crate::modules::sales::services::ledger_filter::{DimensionFilter, ReportWindow};

/// Read access to the append-only sales ledger.
///
/// Connection failures surface as `StoreUnavailable`; a window with no
/// matching rows is an empty vec, not an error.
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Fetch the ledger records inside the inclusive window, narrowed by
    /// the optional dimension-id sets, in ledger order.
    async fn query_by_date_range(
        &self,
        window: &ReportWindow,
        filter: &DimensionFilter,
    ) -> Result<Vec<SaleRecord>>;
}

/// MySQL-backed ledger reader
pub struct MySqlSalesRepository {
    pool: MySqlPool,
}

impl MySqlSalesRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesRepository for MySqlSalesRepository {
    async fn query_by_date_range(
        &self,
        window: &ReportWindow,
        filter: &DimensionFilter,
    ) -> Result<Vec<SaleRecord>> {
        let mut query = QueryBuilder::new(
            "SELECT sale_id, sale_date, customer_id, customer_name, \
             item_id, item_name, quantity, sale_amount, cost_amount, rebate_credit \
             FROM sales WHERE sale_date >= ",
        );
        query.push_bind(window.start);
        query.push(" AND sale_date <= ");
        query.push_bind(window.end);

        if let Some(cids) = &filter.customer_ids {
            push_id_set(&mut query, "customer_id", cids);
        }
        if let Some(iids) = &filter.item_ids {
            push_id_set(&mut query, "item_id", iids);
        }

        // Stable ledger order keeps summation reproducible
        query.push(" ORDER BY sale_date, sale_id");

        let records = query
            .build_query_as::<SaleRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

fn push_id_set<'a>(
    query: &mut QueryBuilder<'a, sqlx::MySql>,
    column: &str,
    ids: &'a [String],
) {
    if ids.is_empty() {
        // An explicit empty set matches nothing
        query.push(" AND 1 = 0");
        return;
    }

    query.push(format!(" AND {} IN (", column));
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    query.push(")");
}
