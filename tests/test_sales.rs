//! Sales metric integration tests against in-memory sample data.

mod common;

use shoplytics::queries::{growth_series, SalesQuery};
use shoplytics::{Bucket, Interval, ShoplyticsError};
use shoplytics::models::SalesPoint;

fn point(bucket: Bucket, total_sales: f64) -> SalesPoint {
    SalesPoint {
        bucket,
        total_sales,
    }
}

// ---------------------------------------------------------------------------
// totals
// ---------------------------------------------------------------------------

#[test]
fn monthly_totals_parse_string_amounts_and_sort_ascending() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    let points = sq.totals(Interval::Monthly).unwrap();
    assert_eq!(points.len(), 3);

    assert_eq!(points[0].bucket, Bucket::monthly(2024, 1));
    assert!((points[0].total_sales - 30.50).abs() < 1e-9);

    assert_eq!(points[1].bucket, Bucket::monthly(2024, 2));
    assert!((points[1].total_sales - 5.00).abs() < 1e-9);

    assert_eq!(points[2].bucket, Bucket::monthly(2024, 3));
    assert!((points[2].total_sales - 269.50).abs() < 1e-9);
}

#[test]
fn quarterly_totals_collapse_q1() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    let points = sq.totals(Interval::Quarterly).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].bucket, Bucket::quarterly(2024, 1));
    assert!((points[0].total_sales - 305.00).abs() < 1e-9);
}

#[test]
fn yearly_totals_collapse_to_one_bucket() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    let points = sq.totals(Interval::Yearly).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].bucket, Bucket::yearly(2024));
    assert!((points[0].total_sales - 305.00).abs() < 1e-9);
}

#[test]
fn daily_totals_are_sparse() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    // Four orders on four distinct days; days without orders never appear.
    let points = sq.totals(Interval::Daily).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].bucket, Bucket::daily(2024, 1, 5));
    assert_eq!(points[3].bucket, Bucket::daily(2024, 3, 15));
}

#[test]
fn totals_are_idempotent() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    let first = sq.totals(Interval::Monthly).unwrap();
    let second = sq.totals(Interval::Monthly).unwrap();
    assert_eq!(first, second);
}

#[test]
fn negative_amounts_are_summed_as_refunds() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = common::empty_connection(&tmp_dir);
    common::write_ndjson_and_register(
        &conn,
        "orders",
        &[
            serde_json::json!({"id": 1, "customer_id": 1, "created_at": "2024-01-02 10:00:00", "total_amount": "100.00"}),
            serde_json::json!({"id": 2, "customer_id": 2, "created_at": "2024-01-09 10:00:00", "total_amount": "-40.00"}),
        ],
    );

    let points = SalesQuery::new(&conn).totals(Interval::Monthly).unwrap();
    assert_eq!(points.len(), 1);
    assert!((points[0].total_sales - 60.00).abs() < 1e-9);
}

#[test]
fn malformed_amount_rejects_the_aggregation() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = common::empty_connection(&tmp_dir);
    common::write_ndjson_and_register(
        &conn,
        "orders",
        &[
            serde_json::json!({"id": 1, "customer_id": 1, "created_at": "2024-01-02 10:00:00", "total_amount": "10.00"}),
            serde_json::json!({"id": 2, "customer_id": 1, "created_at": "2024-01-03 10:00:00", "total_amount": "not-a-number"}),
        ],
    );

    let err = SalesQuery::new(&conn).totals(Interval::Monthly).unwrap_err();
    assert!(matches!(err, ShoplyticsError::MalformedAmount { count: 1 }));
}

// ---------------------------------------------------------------------------
// growth
// ---------------------------------------------------------------------------

#[test]
fn growth_series_computes_percentage_change() {
    let points = vec![
        point(Bucket::monthly(2024, 1), 100.0),
        point(Bucket::monthly(2024, 2), 150.0),
        point(Bucket::monthly(2024, 3), 120.0),
    ];

    let growth = growth_series(&points);
    assert_eq!(growth.len(), 3);
    assert!((growth[0].growth_rate - 0.0).abs() < 1e-9);
    assert!((growth[1].growth_rate - 50.0).abs() < 1e-9);
    assert!((growth[2].growth_rate - (-20.0)).abs() < 1e-9);
}

#[test]
fn growth_series_first_point_is_zero() {
    let growth = growth_series(&[point(Bucket::yearly(2024), 42.0)]);
    assert_eq!(growth.len(), 1);
    assert_eq!(growth[0].growth_rate, 0.0);
    assert!((growth[0].total_sales - 42.0).abs() < 1e-9);
}

#[test]
fn growth_series_zero_previous_total_yields_zero_rate() {
    // A bucket whose total is exactly 0 (e.g. a sale fully refunded) gives
    // the next point no meaningful baseline; the rate is pinned to 0 rather
    // than +/- infinity.
    let points = vec![
        point(Bucket::monthly(2024, 1), 0.0),
        point(Bucket::monthly(2024, 2), 75.0),
    ];

    let growth = growth_series(&points);
    assert_eq!(growth[1].growth_rate, 0.0);
    assert!(growth[1].growth_rate.is_finite());
}

#[test]
fn growth_series_empty_input_is_empty() {
    assert!(growth_series(&[]).is_empty());
}

#[test]
fn growth_over_sample_orders_matches_totals() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SalesQuery::new(&conn);

    let growth = sq.growth(Interval::Monthly).unwrap();
    assert_eq!(growth.len(), 3);

    // Jan 30.50 -> Feb 5.00 is a -83.6% drop; Feb -> Mar 269.50 is +5290%.
    assert_eq!(growth[0].growth_rate, 0.0);
    assert!((growth[1].growth_rate - ((5.00 - 30.50) / 30.50 * 100.0)).abs() < 1e-9);
    assert!((growth[2].growth_rate - ((269.50 - 5.00) / 5.00 * 100.0)).abs() < 1e-9);

    // The underlying totals ride along unchanged.
    assert!((growth[0].total_sales - 30.50).abs() < 1e-9);
    assert_eq!(growth[0].bucket, Bucket::monthly(2024, 1));
}
