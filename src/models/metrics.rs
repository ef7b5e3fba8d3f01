use serde::{Deserialize, Serialize};

use crate::interval::Bucket;

// ---------------------------------------------------------------------------
// SalesPoint — bucketed sales total (query result)
// ---------------------------------------------------------------------------

/// Total sales for one time bucket. The output unit of the sales series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    #[serde(flatten)]
    pub bucket: Bucket,
    pub total_sales: f64,
}

// ---------------------------------------------------------------------------
// GrowthPoint — sales total plus period-over-period growth
// ---------------------------------------------------------------------------

/// A [`SalesPoint`] annotated with percentage change against the previous
/// bucket. The first point of a series carries `growth_rate` 0; so does any
/// point whose previous total is exactly 0 (no meaningful baseline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    #[serde(flatten)]
    pub bucket: Bucket,
    pub total_sales: f64,
    pub growth_rate: f64,
}

// ---------------------------------------------------------------------------
// CountPoint — bucketed record count (new customers)
// ---------------------------------------------------------------------------

/// Number of records falling into one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountPoint {
    #[serde(flatten)]
    pub bucket: Bucket,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// RepeatCustomersPoint — bucketed repeat-customer count
// ---------------------------------------------------------------------------

/// Number of customers who placed more than one order within the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCustomersPoint {
    #[serde(flatten)]
    pub bucket: Bucket,
    pub repeat_customers: i64,
}

// ---------------------------------------------------------------------------
// CityCount — geographic distribution entry
// ---------------------------------------------------------------------------

/// Customer count for one city. `city` is the raw export value: `None` for
/// customers without an address, distinct from the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: Option<String>,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Cohort — customers sharing a first-purchase month
// ---------------------------------------------------------------------------

/// One customer's lifetime spend within a cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortCustomer {
    pub customer_id: i64,
    pub total_price: f64,
}

/// All customers whose first purchase fell in `cohort_month` (`"YYYY-MM"`),
/// with the cohort's summed lifetime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub cohort_month: String,
    pub customers: Vec<CohortCustomer>,
    pub total_lifetime_amount: f64,
}
