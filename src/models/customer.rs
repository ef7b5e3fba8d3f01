use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Customer — one row of the `customers` export
// ---------------------------------------------------------------------------

/// A customer record as it appears in the shop export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    /// ISO-8601 signup timestamp.
    pub created_at: String,
    /// City of the default address; absent for customers without one.
    pub city: Option<String>,
}
