//! Sales queries against the DuckDB-backed `orders` view.

use crate::error::Result;
use crate::interval::Interval;
use crate::models::{GrowthPoint, SalesPoint};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// SalesQuery
// ---------------------------------------------------------------------------

/// Query interface for time-bucketed sales metrics.
pub struct SalesQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> SalesQuery<'a> {
    /// Create a new `SalesQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Total sales per bucket at the given granularity, ascending.
    ///
    /// Buckets with no orders are absent from the result, never emitted as
    /// zero. Fails with
    /// [`MalformedAmount`](crate::ShoplyticsError::MalformedAmount) if any
    /// order carries a non-numeric `total_amount`.
    pub fn totals(&self, interval: Interval) -> Result<Vec<SalesPoint>> {
        self.conn.ensure_views(&["orders"])?;
        super::verify_order_amounts(self.conn)?;

        let (sql, params) = SqlBuilder::new("orders")
            .select_bucket(interval, "created_at")
            .select_expr(
                "COALESCE(SUM(TRY_CAST(total_amount AS DOUBLE)), 0) AS \"totalSales\"",
            )
            .group_by_bucket(interval, "created_at")
            .order_by_bucket(interval)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// [`totals`](Self::totals) annotated with period-over-period growth.
    pub fn growth(&self, interval: Interval) -> Result<Vec<GrowthPoint>> {
        Ok(growth_series(&self.totals(interval)?))
    }
}

// ---------------------------------------------------------------------------
// Growth computation
// ---------------------------------------------------------------------------

/// Annotate an ascending sales series with percentage change per point.
///
/// The first point has growth 0 (no prior baseline). A point whose previous
/// total is exactly 0 also gets growth 0 rather than an infinite rate, so the
/// series stays finite and chartable.
pub fn growth_series(points: &[SalesPoint]) -> Vec<GrowthPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let growth_rate = if i == 0 {
                0.0
            } else {
                let previous = points[i - 1].total_sales;
                if previous == 0.0 {
                    0.0
                } else {
                    ((point.total_sales - previous) / previous) * 100.0
                }
            };
            GrowthPoint {
                bucket: point.bucket,
                total_sales: point.total_sales,
                growth_rate,
            }
        })
        .collect()
}
