use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shoplytics::Interval;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct IntervalParams {
    pub interval: Option<String>,
}

pub fn parse_interval(params: &IntervalParams) -> Result<Interval, AppError> {
    let token = params
        .interval
        .as_deref()
        .ok_or_else(|| AppError::bad_request("interval query parameter is required"))?;
    Ok(Interval::from_str(token)?)
}

/// GET /api/v1/sales?interval=monthly
///
/// Total sales per bucket over the requested interval.
pub async fn total_sales(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IntervalParams>,
) -> Result<Json<Value>, AppError> {
    let interval = parse_interval(&params)?;
    let points = state.sdk.run(move |s| s.sales().totals(interval)).await?;
    Ok(Json(json!(points)))
}

/// GET /api/v1/salesgrowth?interval=monthly
///
/// Period-over-period sales growth rate per bucket.
pub async fn sales_growth(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IntervalParams>,
) -> Result<Json<Value>, AppError> {
    let interval = parse_interval(&params)?;
    let points = state.sdk.run(move |s| s.sales().growth(interval)).await?;
    Ok(Json(json!(points)))
}
