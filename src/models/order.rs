use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Order — one row of the `orders` export
// ---------------------------------------------------------------------------

/// An order record as it appears in the shop export.
///
/// `total_amount` arrives as a string in most exports ("10.00"); it is parsed
/// store-side at aggregation time, and a non-parsable value rejects the
/// aggregation with [`MalformedAmount`](crate::ShoplyticsError::MalformedAmount).
/// Negative amounts (refunds) are legal and summed as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    pub total_amount: String,
}
