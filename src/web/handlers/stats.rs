// Host statistics endpoint

use axum::extract::State;
use axum::response::Json;

use super::common::{ApiResponse, ApiResult};
use crate::health::HostStats;
use crate::web::AppState;

/// GET /api/stats - one-shot host health read
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<HostStats> {
    let stats = state.probe.collect().await;
    Ok(Json(ApiResponse::success(stats)))
}
