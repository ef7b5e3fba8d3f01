//! Shoplytics: commerce analytics SDK for Rust.
//!
//! Computes time-bucketed metrics over shop exports -- total sales, sales
//! growth, new customers, repeat customers, geographic distribution, and
//! cohort lifetime value. Export files (NDJSON, optionally gzipped) are
//! loaded into an in-process DuckDB database and queried through typed
//! interfaces; no server or external database is involved.
//!
//! # Quick start
//!
//! ```no_run
//! use shoplytics::{Interval, Shoplytics};
//!
//! let sdk = Shoplytics::builder()
//!     .data_dir("./export")
//!     .build()
//!     .unwrap();
//!
//! // Monthly sales series
//! let sales = sdk.sales().totals(Interval::Monthly).unwrap();
//!
//! // Cohort lifetime value
//! let cohorts = sdk.cohorts().lifetime_value_by_month().unwrap();
//! # let _ = (sales, cohorts);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod dataset;
pub mod error;
pub mod interval;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncShoplytics;
pub use connection::Connection;
pub use dataset::DatasetStore;
pub use error::{Result, ShoplyticsError};
pub use interval::{Bucket, BucketField, Interval};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ShoplyticsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Shoplytics`] instance.
///
/// Use [`Shoplytics::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ShoplyticsBuilder::build) to create the SDK.
pub struct ShoplyticsBuilder {
    data_dir: Option<PathBuf>,
    export_url: Option<String>,
    offline: bool,
    timeout: Duration,
}

impl Default for ShoplyticsBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_url: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ShoplyticsBuilder {
    /// Set the directory holding the export files.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/shoplytics` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a base URL from which missing export files are downloaded
    /// (e.g. the download endpoint of a completed bulk export).
    ///
    /// Without it the SDK only uses files already present in the data dir.
    pub fn export_url<S: Into<String>>(mut self, url: S) -> Self {
        self.export_url = Some(url.into());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads and only uses local export
    /// files. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for export downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, initializing the data directory and DuckDB connection.
    ///
    /// Export files are **not** read eagerly -- each dataset is registered
    /// lazily on first query.
    pub fn build(self) -> Result<Shoplytics> {
        let dataset = DatasetStore::new(self.data_dir, self.export_url, self.offline, self.timeout)?;
        let conn = Connection::new(dataset)?;
        Ok(Shoplytics { conn })
    }
}

// ---------------------------------------------------------------------------
// Shoplytics
// ---------------------------------------------------------------------------

/// The main entry point for the analytics SDK.
///
/// Wraps a [`Connection`] (which owns the [`DatasetStore`] and DuckDB
/// database) and exposes metric query interfaces as lightweight borrowing
/// wrappers. There is no shared mutable state between metric computations;
/// every call recomputes its result from the underlying records.
///
/// Created via [`Shoplytics::builder()`].
pub struct Shoplytics {
    conn: Connection,
}

impl Shoplytics {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> ShoplyticsBuilder {
        ShoplyticsBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the sales metrics interface (totals and growth).
    pub fn sales(&self) -> queries::sales::SalesQuery<'_> {
        queries::sales::SalesQuery::new(&self.conn)
    }

    /// Access the customer metrics interface (new, repeat, distribution).
    pub fn customers(&self) -> queries::customers::CustomerQuery<'_> {
        queries::customers::CustomerQuery::new(&self.conn)
    }

    /// Access the cohort lifetime-value interface.
    pub fn cohorts(&self) -> queries::cohorts::CohortQuery<'_> {
        queries::cohorts::CohortQuery::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// Load and return the export manifest (shop name, exported_at, counts).
    ///
    /// Fetches `manifest.json` from the data dir (downloading if an export
    /// URL is configured) and returns the parsed JSON object.
    pub fn manifest(&self) -> Result<serde_json::Value> {
        self.conn.dataset.borrow_mut().load_manifest()
    }

    /// Return the list of currently registered DuckDB view names.
    ///
    /// Views are registered lazily on first query, so this list grows as
    /// different metrics are computed.
    pub fn views(&self) -> Vec<String> {
        self.conn.views()
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Provides escape-hatch access for analyses not covered by the metric
    /// interfaces (e.g. the `products` dataset, which has no dedicated
    /// query interface). Call [`prepare_datasets`](Self::prepare_datasets)
    /// first for any dataset views the query references.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    ///
    /// # Returns
    ///
    /// A vector of rows, each represented as a `HashMap<String, serde_json::Value>`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Register the given dataset views, downloading files if needed.
    pub fn prepare_datasets(&self, names: &[&str]) -> Result<()> {
        self.conn.ensure_views(names)
    }

    /// Drop all registered views so re-exported files are picked up.
    ///
    /// The next query against each dataset re-reads its file from disk.
    pub fn reload(&self) {
        self.conn.reset_views();
    }

    /// Remove all local export files and drop registered views.
    ///
    /// Subsequent queries re-download from the export URL, or fail in
    /// offline mode.
    pub fn purge_data(&self) -> Result<()> {
        self.conn.dataset.borrow().clear()?;
        self.conn.reset_views();
        Ok(())
    }

    /// Consume the SDK and release all resources.
    ///
    /// Closes the DuckDB connection and HTTP client. This is called
    /// automatically when the SDK is dropped, but can be invoked explicitly
    /// for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying [`Connection`].
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Shoplytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let views = self.conn.views();
        let dataset = self.conn.dataset.borrow();
        write!(
            f,
            "Shoplytics(data_dir={}, views=[{}], offline={})",
            dataset.data_dir.display(),
            views.join(", "),
            dataset.offline
        )
    }
}
