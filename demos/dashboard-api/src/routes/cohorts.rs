use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/v1/clvByMonth
///
/// Customer lifetime value grouped by first-purchase cohort month.
pub async fn clv_by_month(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let cohorts = state.sdk.run(|s| s.cohorts().lifetime_value_by_month()).await?;
    Ok(Json(json!(cohorts)))
}
