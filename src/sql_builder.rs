//! SQL builder with parameterized query construction.
//!
//! All user-supplied values go through DuckDB's parameter binding (`?`
//! placeholders), never through string interpolation. Builder methods return
//! `&mut Self` for chaining. The bucket-aware helpers splice an
//! [`Interval`]'s grouping-key expressions into the query, which is how every
//! time-series metric maps a granularity onto the store.
//!
//! # Example
//!
//! ```rust
//! use shoplytics::{Interval, SqlBuilder};
//! let (sql, params) = SqlBuilder::new("orders")
//!     .select_bucket(Interval::Monthly, "created_at")
//!     .select_expr("SUM(TRY_CAST(total_amount AS DOUBLE)) AS total_sales")
//!     .group_by_bucket(Interval::Monthly, "created_at")
//!     .order_by_bucket(Interval::Monthly)
//!     .build();
//! # let _ = (sql, params);
//! ```

use crate::interval::Interval;

/// Builds parameterized SQL queries safely.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    is_distinct: bool,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    group_by_cols: Vec<String>,
    having_clauses: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table, view, or subquery
    /// (`"(...) AS t"`).
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: Vec::new(),
            is_distinct: false,
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_cols: Vec::new(),
            having_clauses: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
        }
    }

    /// Set the columns to select. When no column is ever added, `build`
    /// falls back to `*`.
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append a single select expression (aggregates, aliased computations).
    pub fn select_expr(&mut self, expr: &str) -> &mut Self {
        self.select_cols.push(expr.to_string());
        self
    }

    /// Add DISTINCT to the SELECT clause.
    pub fn distinct(&mut self) -> &mut Self {
        self.is_distinct = true;
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    ///
    /// The caller provides a condition using `?` for each parameter value.
    /// Parameters are appended in order.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Add a greater-than-or-equal condition: `{column} >= ?`.
    pub fn where_gte(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} >= ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Add a less-than-or-equal condition: `{column} <= ?`.
    pub fn where_lte(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} <= ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Add an IN condition with parameterized values.
    ///
    /// Empty values list produces `FALSE`.
    pub fn where_in(&mut self, column: &str, values: &[&str]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        self.where_clauses
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
        self.params.extend(values.iter().map(|v| v.to_string()));
        self
    }

    /// Add GROUP BY columns.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols
            .extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add a HAVING condition with `?` placeholders.
    pub fn having(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.having_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"count DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    // -- Bucket helpers ------------------------------------------------------

    /// Select the interval's bucket-key fields extracted from `ts_col`,
    /// aliased to their stable names (`"year"`, `"month"`, ...).
    pub fn select_bucket(&mut self, interval: Interval, ts_col: &str) -> &mut Self {
        self.select_cols.extend(interval.select_exprs(ts_col));
        self
    }

    /// Group by the interval's bucket-key expressions over `ts_col`.
    pub fn group_by_bucket(&mut self, interval: Interval, ts_col: &str) -> &mut Self {
        self.group_by_cols.extend(interval.group_exprs(ts_col));
        self
    }

    /// Order ascending by the interval's bucket fields (chronological).
    pub fn order_by_bucket(&mut self, interval: Interval) -> &mut Self {
        self.order_by_cols.extend(interval.order_clauses());
        self
    }

    // -- Build ---------------------------------------------------------------

    /// Build the final SQL string and parameter list.
    ///
    /// Returns a tuple of `(sql_string, params_list)` ready for execution.
    pub fn build(&self) -> (String, Vec<String>) {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let cols = if self.select_cols.is_empty() {
            "*".to_string()
        } else {
            self.select_cols.join(", ")
        };
        let mut parts = vec![
            format!("SELECT {}{}", distinct, cols),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }

        if !self.having_clauses.is_empty() {
            parts.push(format!("HAVING {}", self.having_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
