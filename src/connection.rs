//! DuckDB connection wrapper with view registration and query execution.
//!
//! Export files are registered lazily as views on first query. Schema
//! introspection adapts to the export format: timestamp columns that arrive
//! as strings are cast to TIMESTAMP so date extraction works uniformly.

use crate::config;
use crate::dataset::DatasetStore;
use crate::error::Result;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Wraps a DuckDB connection and registers NDJSON export files as views.
pub struct Connection {
    conn: DuckDbConnection,
    /// The dataset store used to locate/download export files.
    pub dataset: RefCell<DatasetStore>,
    registered_views: RefCell<HashSet<String>>,
}

impl Connection {
    /// Create a connection backed by the given dataset store.
    ///
    /// Opens an in-memory DuckDB database.
    pub fn new(dataset: DatasetStore) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            dataset: RefCell::new(dataset),
            registered_views: RefCell::new(HashSet::new()),
        })
    }

    /// Ensure one or more dataset views are registered, downloading if needed.
    pub fn ensure_views(&self, views: &[&str]) -> Result<()> {
        for name in views {
            if !self.registered_views.borrow().contains(*name) {
                self.ensure_view(name)?;
            }
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Automatically converts DuckDB types to `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Get column metadata AFTER query execution (calling before panics in duckdb-rs)
        let column_names: Vec<String> = rows_result
            .as_ref()
            .unwrap()
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = rows_result.as_ref().unwrap().column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::new();
            for i in 0..column_count {
                let col_name = &column_names[i];
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    ///
    /// First executes the query as `HashMap` rows, then deserializes each
    /// row using `serde_json`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter()
                    .collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[String]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            let value = convert_value_ref(row.get_ref(0)?);
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// Bypasses the dataset store entirely; used by tests and by callers who
    /// want to analyze ad-hoc record sets without a data directory.
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        let path_fwd = ndjson_path.replace('\\', "/");
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_json_auto('{}', format='newline_delimited')",
            table_name, table_name, path_fwd
        ))?;
        self.registered_views
            .borrow_mut()
            .insert(table_name.to_string());
        Ok(())
    }

    /// Check whether a view has been registered.
    pub fn has_view(&self, name: &str) -> bool {
        self.registered_views.borrow().contains(name)
    }

    /// Return a list of all registered view names.
    pub fn views(&self) -> Vec<String> {
        self.registered_views.borrow().iter().cloned().collect()
    }

    /// Clear all registered views so they will be re-created on next access.
    pub fn reset_views(&self) {
        self.registered_views.borrow_mut().clear();
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }

    /// Lazily register an export file as a DuckDB view.
    ///
    /// Introspects the inferred schema on first registration and builds the
    /// view SQL dynamically, so both string-dated and native-timestamp
    /// exports work without code changes.
    fn ensure_view(&self, view_name: &str) -> Result<()> {
        if self.registered_views.borrow().contains(view_name) {
            return Ok(());
        }

        let path = self.dataset.borrow_mut().ensure_dataset(view_name)?;
        // Use forward slashes for DuckDB compatibility
        let path_str = path.to_string_lossy().replace('\\', "/");

        let replace_clause = self.build_timestamp_replace(&path_str)?;

        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE VIEW {} AS SELECT *{} \
             FROM read_json_auto('{}', format='newline_delimited')",
            view_name, replace_clause, path_str
        ))?;
        self.registered_views
            .borrow_mut()
            .insert(view_name.to_string());
        eprintln!("Registered view: {} -> {}", view_name, path_str);

        Ok(())
    }

    /// Build a REPLACE clause casting string timestamp columns to TIMESTAMP.
    ///
    /// Shop exports are inconsistent about dates: some emit ISO-8601 strings,
    /// some emit values DuckDB already infers as timestamps. Only the columns
    /// that exist as VARCHAR in this file are rewritten. Reads only the
    /// inferred schema (DESCRIBE) -- no data scanning needed.
    fn build_timestamp_replace(&self, path_str: &str) -> Result<String> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name, column_type FROM \
             (DESCRIBE SELECT * FROM read_json_auto('{}', format='newline_delimited'))",
            path_str
        ))?;

        let mut rows = stmt.query([])?;
        let mut schema_map: HashMap<String, String> = HashMap::new();

        while let Some(row) = rows.next()? {
            let col_name: String = row.get(0)?;
            let col_type: String = row.get(1)?;
            schema_map.insert(col_name, col_type);
        }

        let mut exprs: Vec<String> = Vec::new();
        for col in config::TIMESTAMP_COLUMNS {
            if schema_map.get(col).map(|t| t == "VARCHAR").unwrap_or(false) {
                exprs.push(format!(
                    "TRY_CAST(\"{}\" AS TIMESTAMP) AS \"{}\"",
                    col, col
                ));
            }
        }

        if exprs.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!(" REPLACE ({})", exprs.join(", ")))
        }
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        ValueRef::Blob(bytes) => serde_json::Value::String(format!(
            "blob:{}",
            bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>()
        )),
        _ => {
            // Other types (Date, Time, Timestamp, Interval, List, etc.) are
            // not produced by the metric queries; callers selecting them via
            // raw SQL should cast to VARCHAR in the query.
            serde_json::Value::Null
        }
    }
}
