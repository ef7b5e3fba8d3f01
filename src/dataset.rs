//! Export-file resolution and acquisition.
//!
//! Shop exports (orders/customers/products as NDJSON, plus a manifest) live in
//! a local data directory. When an export base URL is configured, missing
//! files are downloaded lazily on first access; offline mode never touches the
//! network and errors on missing files.

use crate::config;
use crate::error::{Result, ShoplyticsError};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locates and (optionally) downloads shop export files.
///
/// A dataset file may be present either plain (`orders.ndjson`) or
/// gzip-compressed (`orders.ndjson.gz`); the compressed variant is preferred
/// when both exist since it is what bulk exports typically produce.
pub struct DatasetStore {
    /// Directory where export files are stored.
    pub data_dir: PathBuf,
    /// If true, never download (use local files only).
    pub offline: bool,
    export_url: Option<String>,
    timeout: Duration,
    client: Option<Client>,
}

impl DatasetStore {
    /// Create a new dataset store.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data
    /// directory. Creates the directory if it does not exist.
    pub fn new(
        data_dir: Option<PathBuf>,
        export_url: Option<String>,
        offline: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            data_dir: dir,
            offline,
            export_url: export_url.map(|u| u.trim_end_matches('/').to_string()),
            timeout,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> &Client {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()
                    .expect("failed to build HTTP client"),
            );
        }
        self.client.as_ref().unwrap()
    }

    /// Resolve a file locally, preferring the gzipped variant.
    fn local_path(&self, filename: &str) -> Option<PathBuf> {
        let gz = self.data_dir.join(format!("{}.gz", filename));
        if gz.exists() {
            return Some(gz);
        }
        let plain = self.data_dir.join(filename);
        if plain.exists() {
            return Some(plain);
        }
        None
    }

    /// Download a single file from the export endpoint.
    ///
    /// Downloads to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let base = self.export_url.clone().ok_or_else(|| {
            ShoplyticsError::NotFound(format!(
                "Dataset file {} is missing and no export URL is configured",
                filename
            ))
        })?;
        let url = format!("{}/{}", base, filename);
        eprintln!("Downloading {}", url);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client().clone();
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Ensure a dataset file is present locally, downloading if needed.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical dataset name (`"orders"`, `"customers"`, `"products"`).
    ///
    /// # Returns
    ///
    /// Local filesystem path to the export file (plain or `.gz`).
    pub fn ensure_dataset(&mut self, name: &str) -> Result<PathBuf> {
        let files = config::dataset_files();
        let filename = files
            .get(name)
            .ok_or_else(|| ShoplyticsError::NotFound(format!("Unknown dataset: {}", name)))?;

        if let Some(path) = self.local_path(filename) {
            return Ok(path);
        }

        if self.offline || self.export_url.is_none() {
            return Err(ShoplyticsError::NotFound(format!(
                "Dataset file {} not present in {} and downloads are disabled",
                filename,
                self.data_dir.display()
            )));
        }

        let dest = self.data_dir.join(filename);
        self.download_file(filename, &dest)?;
        Ok(dest)
    }

    /// Load and parse the export manifest (handles `.gz` transparently).
    ///
    /// If the local file is corrupt (truncated download, disk error), it is
    /// deleted automatically so the next call re-downloads a fresh copy.
    pub fn load_manifest(&mut self) -> Result<serde_json::Value> {
        let path = match self.local_path(config::MANIFEST_FILE) {
            Some(p) => p,
            None => {
                if self.offline || self.export_url.is_none() {
                    return Err(ShoplyticsError::NotFound(format!(
                        "{} not present in {} and downloads are disabled",
                        config::MANIFEST_FILE,
                        self.data_dir.display()
                    )));
                }
                let dest = self.data_dir.join(config::MANIFEST_FILE);
                self.download_file(config::MANIFEST_FILE, &dest)?;
                dest
            }
        };

        let parse_result = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(&path)?;
            let decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = String::new();
            BufReader::new(decoder).read_to_string(&mut contents)?;
            serde_json::from_str(&contents).map_err(ShoplyticsError::from)
        } else {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(ShoplyticsError::from)
        };

        match parse_result {
            Ok(value) => Ok(value),
            Err(e) => {
                eprintln!("Corrupt manifest {}: {} -- removing", path.display(), e);
                let _ = fs::remove_file(&path);
                Err(ShoplyticsError::NotFound(format!(
                    "Manifest '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )))
            }
        }
    }

    /// Remove all local export files and recreate the data directory.
    pub fn clear(&self) -> Result<()> {
        if self.data_dir.exists() {
            fs::remove_dir_all(&self.data_dir)?;
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
