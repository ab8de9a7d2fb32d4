// Notification test endpoint

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use super::common::{ApiResponse, ApiResult};
use crate::services::notifier::NotificationKind;
use crate::web::AppState;

/// POST /api/test-notification - fire every configured channel
pub async fn test_notification(State(state): State<AppState>) -> ApiResult<Value> {
    info!("Test notification requested");

    if !state.notifier.is_enabled() {
        return Ok(Json(ApiResponse::success(json!({
            "message": "No notification channels configured",
            "channels": [],
        }))));
    }

    let results = state
        .notifier
        .deliver_all(NotificationKind::Test, "Test notification from the server!")
        .await;

    Ok(Json(ApiResponse::success(json!({
        "message": "Test complete, check the configured channels",
        "channels": results,
    }))))
}
