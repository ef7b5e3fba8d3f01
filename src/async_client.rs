//! Async wrapper around [`Shoplytics`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! aggregation queries are CPU-bound but fast, making this approach
//! efficient. Metric computations dispatched concurrently are independent;
//! no cross-metric snapshot is promised.
//!
//! # Example
//!
//! ```no_run
//! use shoplytics::{AsyncShoplytics, Interval};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncShoplytics::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let sales = sdk.run(|s| s.sales().totals(Interval::Monthly)).await.unwrap();
//!
//!     // Convenience method for raw SQL
//!     let rows = sdk.sql("SELECT COUNT(*) FROM orders", &[]).await.unwrap();
//!     # let _ = (sales, rows);
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Result, ShoplyticsError};
use crate::Shoplytics;

// ---------------------------------------------------------------------------
// AsyncShoplyticsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncShoplytics`] instance.
pub struct AsyncShoplyticsBuilder {
    data_dir: Option<PathBuf>,
    export_url: Option<String>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncShoplyticsBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_url: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl AsyncShoplyticsBuilder {
    /// Set the directory holding the export files.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a base URL from which missing export files are downloaded.
    pub fn export_url<S: Into<String>>(mut self, url: S) -> Self {
        self.export_url = Some(url.into());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for export downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK, initializing the data dir and DuckDB connection.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncShoplytics> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Shoplytics::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(url) = self.export_url {
                builder = builder.export_url(url);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncShoplytics {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| ShoplyticsError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncShoplytics
// ---------------------------------------------------------------------------

/// Async wrapper around [`Shoplytics`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`Shoplytics`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
///
/// # Usage
///
/// Use [`run()`](Self::run) to execute any sync SDK method:
///
/// ```no_run
/// # use shoplytics::{AsyncShoplytics, Interval};
/// # async fn example() -> shoplytics::Result<()> {
/// let sdk = AsyncShoplytics::builder().build().await?;
/// let growth = sdk.run(|s| s.sales().growth(Interval::Quarterly)).await?;
/// # let _ = growth;
/// # Ok(())
/// # }
/// ```
pub struct AsyncShoplytics {
    inner: Arc<Mutex<Shoplytics>>,
}

impl AsyncShoplytics {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncShoplyticsBuilder {
        AsyncShoplyticsBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&Shoplytics` reference and should return a
    /// `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Shoplytics) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| ShoplyticsError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ShoplyticsError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`Shoplytics::sql()`].
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Load and return the export manifest asynchronously.
    pub async fn manifest(&self) -> Result<serde_json::Value> {
        self.run(|s| s.manifest()).await
    }

    /// Drop all registered views so re-exported files are picked up.
    pub async fn reload(&self) -> Result<()> {
        self.run(|s| {
            s.reload();
            Ok(())
        })
        .await
    }

    /// Return the list of currently registered DuckDB view names.
    pub async fn views(&self) -> Result<Vec<String>> {
        self.run(|s| Ok(s.views())).await
    }

    /// Close the SDK, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| ShoplyticsError::InvalidArgument("SDK lock poisoned".into()))?;
            // Dropping the MutexGuard drops the SDK
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| ShoplyticsError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
