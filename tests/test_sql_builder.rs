//! Unit tests for SqlBuilder query construction, including the bucket-aware
//! helpers.

use shoplytics::{Interval, SqlBuilder};

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("orders").build();
    assert_eq!(sql, "SELECT *\nFROM orders");
    assert!(params.is_empty());
}

#[test]
fn select_sets_columns() {
    let (sql, _) = SqlBuilder::new("customers")
        .select(&["id", "city"])
        .build();
    assert!(sql.starts_with("SELECT id, city\n"));
}

#[test]
fn select_expr_appends_to_selection() {
    let (sql, _) = SqlBuilder::new("customers")
        .select(&["city"])
        .select_expr("COUNT(*) AS \"count\"")
        .build();
    assert!(sql.starts_with("SELECT city, COUNT(*) AS \"count\"\n"));
}

#[test]
fn distinct_adds_keyword() {
    let (sql, _) = SqlBuilder::new("orders").distinct().build();
    assert!(sql.starts_with("SELECT DISTINCT *"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_eq_adds_equality_with_param() {
    let (sql, params) = SqlBuilder::new("orders")
        .where_eq("customer_id", "101")
        .build();
    assert!(sql.contains("WHERE customer_id = ?"));
    assert_eq!(params, vec!["101"]);
}

#[test]
fn where_gte_and_lte_add_range_conditions() {
    let (sql, params) = SqlBuilder::new("orders")
        .where_gte("created_at", "2024-01-01")
        .where_lte("created_at", "2024-12-31")
        .build();
    assert!(sql.contains("created_at >= ?"));
    assert!(sql.contains("created_at <= ?"));
    assert_eq!(params, vec!["2024-01-01", "2024-12-31"]);
}

#[test]
fn where_in_adds_in_clause() {
    let (sql, params) = SqlBuilder::new("customers")
        .where_in("city", &["Hyderabad", "Chennai"])
        .build();
    assert!(sql.contains("city IN (?, ?)"));
    assert_eq!(params, vec!["Hyderabad", "Chennai"]);
}

#[test]
fn where_in_empty_produces_false() {
    let (sql, params) = SqlBuilder::new("customers").where_in("city", &[]).build();
    assert!(sql.contains("WHERE FALSE"));
    assert!(params.is_empty());
}

#[test]
fn where_clause_appends_params_in_order() {
    let (sql, params) = SqlBuilder::new("orders")
        .where_eq("customer_id", "101")
        .where_clause("TRY_CAST(total_amount AS DOUBLE) > ?", &["50"])
        .build();
    assert!(sql.contains("customer_id = ?"));
    assert!(sql.contains("TRY_CAST(total_amount AS DOUBLE) > ?"));
    assert_eq!(params, vec!["101", "50"]);
}

#[test]
fn multiple_conditions_are_and_combined() {
    let (sql, _) = SqlBuilder::new("orders")
        .where_eq("customer_id", "101")
        .where_gte("created_at", "2024-01-01")
        .build();
    assert!(sql.contains("WHERE customer_id = ? AND created_at >= ?"));
}

// ---------------------------------------------------------------------------
// GROUP BY / HAVING / ORDER BY / LIMIT
// ---------------------------------------------------------------------------

#[test]
fn group_by_and_having() {
    let (sql, params) = SqlBuilder::new("orders")
        .select(&["customer_id", "COUNT(*) AS n"])
        .group_by(&["customer_id"])
        .having("COUNT(*) > ?", &["1"])
        .build();
    assert!(sql.contains("GROUP BY customer_id"));
    assert!(sql.contains("HAVING COUNT(*) > ?"));
    assert_eq!(params, vec!["1"]);
}

#[test]
fn order_by_and_limit() {
    let (sql, _) = SqlBuilder::new("customers")
        .order_by(&["\"count\" DESC", "city ASC"])
        .limit(10)
        .build();
    assert!(sql.contains("ORDER BY \"count\" DESC, city ASC"));
    assert!(sql.ends_with("LIMIT 10"));
}

// ---------------------------------------------------------------------------
// Bucket helpers
// ---------------------------------------------------------------------------

#[test]
fn select_bucket_adds_aliased_extractions() {
    let (sql, _) = SqlBuilder::new("orders")
        .select_bucket(Interval::Monthly, "created_at")
        .build();
    assert!(sql.contains("date_part('year', CAST(created_at AS TIMESTAMP)) AS \"year\""));
    assert!(sql.contains("date_part('month', CAST(created_at AS TIMESTAMP)) AS \"month\""));
    assert!(!sql.contains("'day'"));
}

#[test]
fn group_by_bucket_groups_on_bare_expressions() {
    let (sql, _) = SqlBuilder::new("orders")
        .select_bucket(Interval::Yearly, "created_at")
        .group_by_bucket(Interval::Yearly, "created_at")
        .build();
    assert!(sql.contains("GROUP BY date_part('year', CAST(created_at AS TIMESTAMP))"));
}

#[test]
fn order_by_bucket_orders_ascending_by_alias() {
    let (sql, _) = SqlBuilder::new("orders")
        .select_bucket(Interval::Daily, "created_at")
        .order_by_bucket(Interval::Daily)
        .build();
    assert!(sql.contains("ORDER BY \"year\" ASC, \"month\" ASC, \"day\" ASC"));
}

#[test]
fn quarterly_bucket_uses_quarter_extraction() {
    let (sql, _) = SqlBuilder::new("orders")
        .select_bucket(Interval::Quarterly, "created_at")
        .group_by_bucket(Interval::Quarterly, "created_at")
        .order_by_bucket(Interval::Quarterly)
        .build();
    assert!(sql.contains("date_part('quarter', CAST(created_at AS TIMESTAMP))"));
    assert!(sql.contains("ORDER BY \"year\" ASC, \"quarter\" ASC"));
}

#[test]
fn full_metric_query_shape() {
    let (sql, params) = SqlBuilder::new("orders")
        .select_bucket(Interval::Monthly, "created_at")
        .select_expr("COALESCE(SUM(TRY_CAST(total_amount AS DOUBLE)), 0) AS \"totalSales\"")
        .group_by_bucket(Interval::Monthly, "created_at")
        .order_by_bucket(Interval::Monthly)
        .build();
    assert!(sql.starts_with("SELECT date_part('year'"));
    assert!(sql.contains("AS \"totalSales\""));
    assert!(sql.contains("GROUP BY"));
    assert!(sql.contains("ORDER BY \"year\" ASC, \"month\" ASC"));
    assert!(params.is_empty());
}
