//! Query modules for the analytics SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes metric methods
//! returning typed result rows.

pub mod cohorts;
pub mod customers;
pub mod sales;

pub use cohorts::CohortQuery;
pub use customers::CustomerQuery;
pub use sales::{growth_series, SalesQuery};

use crate::connection::Connection;
use crate::error::{Result, ShoplyticsError};

/// Reject the aggregation when any order's `total_amount` is present but not
/// parsable as a number. A partial sum would silently understate revenue;
/// failing loudly lets the caller fix the export and retry. NULL amounts are
/// not counted here -- SUM skips them like any store-side aggregate.
pub(crate) fn verify_order_amounts(conn: &Connection) -> Result<()> {
    let sql = "SELECT COUNT(*) FROM orders \
               WHERE total_amount IS NOT NULL \
                 AND TRY_CAST(total_amount AS DOUBLE) IS NULL";
    let count = conn
        .execute_scalar(sql, &[])?
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    if count > 0 {
        Err(ShoplyticsError::MalformedAmount { count })
    } else {
        Ok(())
    }
}
