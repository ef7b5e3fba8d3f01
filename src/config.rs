use std::collections::HashMap;
use std::path::PathBuf;

/// Logical dataset name -> export file name within the data directory.
///
/// Each file is newline-delimited JSON, one record per line, optionally
/// gzip-compressed (`<name>.ndjson.gz`) -- DuckDB reads both transparently.
pub fn dataset_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("orders", "orders.ndjson"),
        ("customers", "customers.ndjson"),
        ("products", "products.ndjson"),
    ])
}

/// Export manifest file name (shop name, exported_at, record counts).
pub const MANIFEST_FILE: &str = "manifest.json";

/// Timestamp columns normalized to TIMESTAMP at view registration when the
/// export carries them as strings.
pub const TIMESTAMP_COLUMNS: [&str; 3] = ["created_at", "updated_at", "processed_at"];

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("shoplytics")
    } else {
        PathBuf::from(".shoplytics-data")
    }
}
