pub mod cohorts;
pub mod customers;
pub mod sales;

/// GET /api/v1/home
///
/// Liveness check.
pub async fn home() -> &'static str {
    "Welcome to the shop analytics API"
}
