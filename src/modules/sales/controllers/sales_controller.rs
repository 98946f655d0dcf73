use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::sales::repositories::MySqlSalesRepository;
use crate::modules::sales::services::SalesReportService;

/// Query parameters shared by every report endpoint
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Start of the report window (inclusive, format: YYYY-MM-DD)
    pub start: String,
    /// End of the report window (inclusive, format: YYYY-MM-DD)
    pub end: String,
}

fn service(pool: &web::Data<MySqlPool>) -> SalesReportService<MySqlSalesRepository> {
    SalesReportService::new(MySqlSalesRepository::new(pool.get_ref().clone()))
}

/// GET /sales
///
/// Raw ledger listing for the window, in ledger order.
pub async fn get_sales(
    pool: web::Data<MySqlPool>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let records = service(&pool).sales_in_window(&query.start, &query.end).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// GET /sales/cust/{cid}
///
/// Customer+item breakdown for a hyphen-delimited customer-id set.
pub async fn get_sales_by_customer(
    pool: web::Data<MySqlPool>,
    cid: web::Path<String>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .sales_by_customer_set(&query.start, &query.end, &cid)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/item/{iid}
///
/// Customer+item breakdown for a hyphen-delimited item-id set.
pub async fn get_sales_by_item(
    pool: web::Data<MySqlPool>,
    iid: web::Path<String>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .sales_by_item_set(&query.start, &query.end, &iid)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/summary/cust/{cid}
pub async fn get_summary_by_customer(
    pool: web::Data<MySqlPool>,
    cid: web::Path<String>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .summary_by_customer_set(&query.start, &query.end, &cid)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/summary/item/{iid}
pub async fn get_summary_by_item(
    pool: web::Data<MySqlPool>,
    iid: web::Path<String>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .summary_by_item_set(&query.start, &query.end, &iid)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/summary/customers
///
/// Per-customer summary across every customer in the window.
pub async fn get_summary_all_customers(
    pool: web::Data<MySqlPool>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .summary_all_customers(&query.start, &query.end)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/summary/items
pub async fn get_summary_all_items(
    pool: web::Data<MySqlPool>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let entries = service(&pool)
        .summary_all_items(&query.start, &query.end)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /sales/customers/distinct
pub async fn get_distinct_customers(
    pool: web::Data<MySqlPool>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let identifiers = service(&pool)
        .distinct_customers(&query.start, &query.end)
        .await?;
    Ok(HttpResponse::Ok().json(identifiers))
}

/// GET /sales/items/distinct
pub async fn get_distinct_items(
    pool: web::Data<MySqlPool>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let identifiers = service(&pool)
        .distinct_items(&query.start, &query.end)
        .await?;
    Ok(HttpResponse::Ok().json(identifiers))
}

/// GET /sales/avg-price/{cid}/{iid}
pub async fn get_avg_price(
    pool: web::Data<MySqlPool>,
    path: web::Path<(String, String)>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse> {
    let (cid, iid) = path.into_inner();
    let entries = service(&pool)
        .avg_price(&query.start, &query.end, &cid, &iid)
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Configure routes for the sales module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sales")
            .route("", web::get().to(get_sales))
            .route("/cust/{cid}", web::get().to(get_sales_by_customer))
            .route("/item/{iid}", web::get().to(get_sales_by_item))
            .route("/summary/cust/{cid}", web::get().to(get_summary_by_customer))
            .route("/summary/item/{iid}", web::get().to(get_summary_by_item))
            .route("/summary/customers", web::get().to(get_summary_all_customers))
            .route("/summary/items", web::get().to(get_summary_all_items))
            .route("/customers/distinct", web::get().to(get_distinct_customers))
            .route("/items/distinct", web::get().to(get_distinct_items))
            .route("/avg-price/{cid}/{iid}", web::get().to(get_avg_price)),
    );
}
