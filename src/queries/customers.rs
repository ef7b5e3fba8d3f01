//! Customer metrics against the DuckDB-backed `customers` and `orders` views.

use crate::error::Result;
use crate::interval::Interval;
use crate::models::{CityCount, CountPoint, RepeatCustomersPoint};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// CustomerQuery
// ---------------------------------------------------------------------------

/// Query interface for customer acquisition, retention, and distribution.
pub struct CustomerQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> CustomerQuery<'a> {
    /// Create a new `CustomerQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// New customers per bucket: signups grouped by `created_at`, ascending.
    ///
    /// Sparse like every time series -- buckets without signups are absent.
    pub fn new_by_interval(&self, interval: Interval) -> Result<Vec<CountPoint>> {
        self.conn.ensure_views(&["customers"])?;

        let (sql, params) = SqlBuilder::new("customers")
            .select_bucket(interval, "created_at")
            .select_expr("COUNT(*) AS \"count\"")
            .group_by_bucket(interval, "created_at")
            .order_by_bucket(interval)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Repeat customers per bucket, ascending.
    ///
    /// A customer counts as repeating within a bucket iff they placed more
    /// than one order inside that same bucket; orders spread across buckets
    /// do not qualify. Built as a two-stage grouping: orders grouped by
    /// (customer, bucket) with `HAVING COUNT(*) > 1`, then the surviving
    /// pairs regrouped by bucket counting customers.
    pub fn repeat_by_interval(&self, interval: Interval) -> Result<Vec<RepeatCustomersPoint>> {
        self.conn.ensure_views(&["orders"])?;

        let (per_customer_sql, _) = SqlBuilder::new("orders")
            .select(&["customer_id"])
            .select_bucket(interval, "created_at")
            .group_by(&["customer_id"])
            .group_by_bucket(interval, "created_at")
            .having("COUNT(*) > 1", &[])
            .build();

        let fields: Vec<String> = interval
            .bucket_fields()
            .iter()
            .map(|f| format!("\"{}\"", f.alias()))
            .collect();
        let field_refs: Vec<&str> = fields.iter().map(|s| s.as_str()).collect();

        let mut qb = SqlBuilder::new(&format!("({}) AS per_customer", per_customer_sql));
        qb.select(&field_refs)
            .select_expr("COUNT(*) AS \"repeatCustomers\"")
            .group_by(&field_refs)
            .order_by_bucket(interval);

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Geographic distribution: customers per city, most populous first.
    ///
    /// Cities are the raw export strings, case-sensitive; customers without
    /// a city form their own `None` bucket. Equal counts tie-break by city
    /// name so recomputation is deterministic.
    pub fn distribution(&self) -> Result<Vec<CityCount>> {
        self.conn.ensure_views(&["customers"])?;

        let (sql, params) = SqlBuilder::new("customers")
            .select(&["city", "COUNT(*) AS \"count\""])
            .group_by(&["city"])
            .order_by(&["\"count\" DESC", "city ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }
}
