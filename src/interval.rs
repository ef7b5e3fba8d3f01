//! Time-interval bucketing: granularity tokens, grouping-key fields, and the
//! ordered bucket key type shared by every time-series metric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShoplyticsError;

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Reporting granularity for time-bucketed metrics.
///
/// Parses from the request token via [`FromStr`]; an unknown token is an
/// [`ShoplyticsError::InvalidInterval`], never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One bucket per calendar day.
    Daily,
    /// One bucket per calendar month.
    Monthly,
    /// One bucket per calendar quarter (Q1 = Jan-Mar).
    Quarterly,
    /// One bucket per calendar year.
    Yearly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Monthly => "monthly",
            Interval::Quarterly => "quarterly",
            Interval::Yearly => "yearly",
        }
    }

    /// All supported intervals.
    pub fn all() -> [Interval; 4] {
        [
            Interval::Daily,
            Interval::Monthly,
            Interval::Quarterly,
            Interval::Yearly,
        ]
    }

    /// The bucket-key fields for this granularity.
    pub fn bucket_fields(&self) -> &'static [BucketField] {
        match self {
            Interval::Daily => &[BucketField::Year, BucketField::Month, BucketField::Day],
            Interval::Monthly => &[BucketField::Year, BucketField::Month],
            Interval::Quarterly => &[BucketField::Year, BucketField::Quarter],
            Interval::Yearly => &[BucketField::Year],
        }
    }

    /// Aliased SELECT expressions extracting the bucket fields from a
    /// timestamp column, e.g. `date_part('year', ...) AS "year"`.
    pub fn select_exprs(&self, ts_col: &str) -> Vec<String> {
        self.bucket_fields()
            .iter()
            .map(|f| format!("{} AS \"{}\"", f.expr(ts_col), f.alias()))
            .collect()
    }

    /// Bare grouping expressions matching [`select_exprs`](Self::select_exprs).
    pub fn group_exprs(&self, ts_col: &str) -> Vec<String> {
        self.bucket_fields()
            .iter()
            .map(|f| f.expr(ts_col))
            .collect()
    }

    /// ORDER BY clauses sorting buckets chronologically ascending.
    pub fn order_clauses(&self) -> Vec<String> {
        self.bucket_fields()
            .iter()
            .map(|f| format!("\"{}\" ASC", f.alias()))
            .collect()
    }

    /// Calendar quarter for a 1-based month: ceil(month / 3).
    pub fn quarter_of_month(month: u32) -> u32 {
        month.div_ceil(3)
    }
}

impl FromStr for Interval {
    type Err = ShoplyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Interval::Daily),
            "monthly" => Ok(Interval::Monthly),
            "quarterly" => Ok(Interval::Quarterly),
            "yearly" => Ok(Interval::Yearly),
            other => Err(ShoplyticsError::InvalidInterval(other.to_string())),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BucketField
// ---------------------------------------------------------------------------

/// A single component of a bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketField {
    Year,
    Quarter,
    Month,
    Day,
}

impl BucketField {
    /// Stable column alias used in SELECT/ORDER BY and in result rows.
    pub fn alias(&self) -> &'static str {
        match self {
            BucketField::Year => "year",
            BucketField::Quarter => "quarter",
            BucketField::Month => "month",
            BucketField::Day => "day",
        }
    }

    /// SQL extraction expression over a timestamp column.
    ///
    /// The CAST tolerates exports where the column is still a string; for a
    /// native TIMESTAMP column it is a no-op.
    pub fn expr(&self, ts_col: &str) -> String {
        let part = match self {
            BucketField::Year => "year",
            BucketField::Quarter => "quarter",
            BucketField::Month => "month",
            BucketField::Day => "day",
        };
        format!("date_part('{}', CAST({} AS TIMESTAMP))", part, ts_col)
    }
}

// ---------------------------------------------------------------------------
// Bucket
// ---------------------------------------------------------------------------

/// A bucket key: the time-grouping unit a record is assigned to.
///
/// Two records share a bucket iff all present fields are equal. The derived
/// `Ord` sorts by (year, quarter, month, day); buckets of a single granularity
/// agree on which fields are absent, so this is chronological order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Bucket {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

impl Bucket {
    pub fn yearly(year: i32) -> Self {
        Self {
            year,
            quarter: None,
            month: None,
            day: None,
        }
    }

    pub fn quarterly(year: i32, quarter: u8) -> Self {
        Self {
            year,
            quarter: Some(quarter),
            month: None,
            day: None,
        }
    }

    pub fn monthly(year: i32, month: u8) -> Self {
        Self {
            year,
            quarter: None,
            month: Some(month),
            day: None,
        }
    }

    pub fn daily(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            quarter: None,
            month: Some(month),
            day: Some(day),
        }
    }
}

/// Chart-friendly labels: `2024`, `2024-Q1`, `2024-01`, `2024-01-15`.
impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.quarter, self.month, self.day) {
            (Some(q), _, _) => write!(f, "{}-Q{}", self.year, q),
            (None, Some(m), Some(d)) => write!(f, "{}-{:02}-{:02}", self.year, m, d),
            (None, Some(m), None) => write!(f, "{}-{:02}", self.year, m),
            (None, None, _) => write!(f, "{}", self.year),
        }
    }
}
