//! Shared test fixtures for the shoplytics integration tests.
//!
//! Provides `setup_sample_db()` which creates an in-memory DuckDB connection
//! populated with small `orders` and `customers` tables via NDJSON temp files.

#![allow(dead_code)]

use shoplytics::{Connection, DatasetStore};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Create a `Connection` backed by a temporary data directory with sample
/// orders and customers loaded into DuckDB tables via NDJSON temp files.
///
/// Returns `(Connection, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test so the data directory is not
/// deleted prematurely.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let conn = empty_connection(&tmp_dir);

    register_orders(&conn);
    register_customers(&conn);

    (conn, tmp_dir)
}

/// An offline `Connection` with no tables registered.
pub fn empty_connection(tmp_dir: &tempfile::TempDir) -> Connection {
    let store = DatasetStore::new(
        Some(tmp_dir.path().to_path_buf()),
        None,
        true,
        Duration::from_secs(30),
    )
    .unwrap();
    Connection::new(store).unwrap()
}

// Sample orders:
//   customer 101: 2024-01-05 "10.00", 2024-01-20 "20.50", 2024-03-15 "269.50"
//     -> three Q1 orders, lifetime spend 300.00, cohort 2024-01
//   customer 102: 2024-02-10 "5.00"
//     -> single order, cohort 2024-02
fn register_orders(conn: &Connection) {
    let orders = vec![
        serde_json::json!({
            "id": 1,
            "customer_id": 101,
            "created_at": "2024-01-05 10:00:00",
            "total_amount": "10.00"
        }),
        serde_json::json!({
            "id": 2,
            "customer_id": 101,
            "created_at": "2024-01-20 12:30:00",
            "total_amount": "20.50"
        }),
        serde_json::json!({
            "id": 3,
            "customer_id": 102,
            "created_at": "2024-02-10 09:15:00",
            "total_amount": "5.00"
        }),
        serde_json::json!({
            "id": 4,
            "customer_id": 101,
            "created_at": "2024-03-15 18:00:00",
            "total_amount": "269.50"
        }),
    ];

    write_ndjson_and_register(conn, "orders", &orders);
}

// Sample customers: two in Hyderabad, one in Chennai, one without a city.
fn register_customers(conn: &Connection) {
    let customers = vec![
        serde_json::json!({
            "id": 101,
            "created_at": "2023-12-01 08:00:00",
            "city": "Hyderabad"
        }),
        serde_json::json!({
            "id": 102,
            "created_at": "2024-01-15 10:00:00",
            "city": "Chennai"
        }),
        serde_json::json!({
            "id": 103,
            "created_at": "2024-01-20 11:00:00",
            "city": "Hyderabad"
        }),
        serde_json::json!({
            "id": 104,
            "created_at": "2024-02-02 09:00:00",
            "city": null
        }),
    ];

    write_ndjson_and_register(conn, "customers", &customers);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
pub fn write_ndjson_and_register(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into an in-memory table, so this is fine.
}
