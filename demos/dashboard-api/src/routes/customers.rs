use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::sales::IntervalParams;
use crate::state::AppState;

/// GET /api/v1/newcustomers?interval=monthly
///
/// Count of customers whose account was created in each bucket.
pub async fn new_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IntervalParams>,
) -> Result<Json<Value>, AppError> {
    let interval = super::sales::parse_interval(&params)?;
    let points = state
        .sdk
        .run(move |s| s.customers().new_by_interval(interval))
        .await?;
    Ok(Json(json!(points)))
}

/// GET /api/v1/repeatcustomers?interval=quarterly
///
/// Count of customers with more than one order within each bucket.
pub async fn repeat_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IntervalParams>,
) -> Result<Json<Value>, AppError> {
    let interval = super::sales::parse_interval(&params)?;
    let points = state
        .sdk
        .run(move |s| s.customers().repeat_by_interval(interval))
        .await?;
    Ok(Json(json!(points)))
}

/// GET /api/v1/customerDistribution
///
/// Customer counts per city, most customers first.
pub async fn customer_distribution(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let points = state.sdk.run(|s| s.customers().distribution()).await?;
    Ok(Json(json!(points)))
}
