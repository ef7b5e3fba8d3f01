#[derive(Debug, thiserror::Error)]
pub enum ShoplyticsError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid interval {0:?}: must be one of \"daily\", \"monthly\", \"quarterly\", or \"yearly\"")]
    InvalidInterval(String),

    #[error("{count} order(s) have a total_amount that does not parse as a number")]
    MalformedAmount { count: i64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ShoplyticsError>;
