//! Sales metrics reporting backend.
//!
//! Turns an append-only ledger of sale line items into derived financial
//! metrics (gross profit, margin, average price, trade discounts and
//! trailing-twelve-month trends), grouped by customer, item or both.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::sales;
