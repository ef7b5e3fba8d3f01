//! Cohort lifetime-value queries against the DuckDB-backed `orders` view.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{Cohort, CohortCustomer};

/// Per-customer row of the cohort query: first-purchase month plus lifetime
/// spend, computed store-side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CohortRow {
    customer_id: i64,
    cohort_month: String,
    total_price: f64,
}

// ---------------------------------------------------------------------------
// CohortQuery
// ---------------------------------------------------------------------------

/// Query interface for cohort lifetime value.
pub struct CohortQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> CohortQuery<'a> {
    /// Create a new `CohortQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Customer lifetime value grouped by first-purchase month, ascending.
    ///
    /// Each customer is assigned to exactly one cohort, keyed by the
    /// `YYYY-MM` of their earliest order; later orders add to their lifetime
    /// spend but never move them to another cohort. Every cohort carries its
    /// customer list and the summed `total_lifetime_amount`.
    pub fn lifetime_value_by_month(&self) -> Result<Vec<Cohort>> {
        self.conn.ensure_views(&["orders"])?;
        super::verify_order_amounts(self.conn)?;

        let sql = r#"
            SELECT
                customer_id AS "customerId",
                strftime(MIN(CAST(created_at AS TIMESTAMP)), '%Y-%m') AS "cohortMonth",
                COALESCE(SUM(TRY_CAST(total_amount AS DOUBLE)), 0) AS "totalPrice"
            FROM orders
            GROUP BY customer_id
        "#;

        let rows: Vec<CohortRow> = self.conn.execute_into(sql, &[])?;

        // BTreeMap keys are the "YYYY-MM" strings, so iteration order is the
        // required ascending cohort order.
        let mut by_month: BTreeMap<String, Vec<CohortCustomer>> = BTreeMap::new();
        for row in rows {
            by_month.entry(row.cohort_month).or_default().push(CohortCustomer {
                customer_id: row.customer_id,
                total_price: row.total_price,
            });
        }

        Ok(by_month
            .into_iter()
            .map(|(cohort_month, mut customers)| {
                customers.sort_by_key(|c| c.customer_id);
                let total_lifetime_amount = customers.iter().map(|c| c.total_price).sum();
                Cohort {
                    cohort_month,
                    customers,
                    total_lifetime_amount,
                }
            })
            .collect())
    }
}
