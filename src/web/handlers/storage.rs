// Generic file storage endpoints

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::{error, info};

use super::common::{
    bad_request, internal_error, read_post_form, unique_filename, ApiResponse, ApiResult,
};
use crate::web::AppState;

/// POST /api/upload - store a file through the configured backend
pub async fn upload_file(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Value> {
    let form = read_post_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| bad_request("No file selected".to_string()))?;

    let name = unique_filename(&file.original_name);
    let size = file.bytes.len();

    match state.storage.upload(file.bytes, &name).await {
        Ok(object) => {
            info!(
                "File uploaded via {} backend: {} ({} bytes)",
                object.storage, object.id, size
            );
            Ok(Json(ApiResponse::success(json!({
                "message": "File uploaded successfully",
                "file": {
                    "filename": name,
                    "originalName": file.original_name,
                    "size": size,
                    "url": object.url,
                    "fileId": object.id,
                    "storage": object.storage,
                    "mimetype": file.content_type,
                },
            }))))
        }
        Err(e) => {
            error!("Upload through {} backend failed: {}", state.storage.name(), e);
            Err(internal_error(e.to_string()))
        }
    }
}

/// GET /api/storage/quota - backend quota when the backend tracks one
pub async fn get_storage_quota(State(state): State<AppState>) -> ApiResult<Value> {
    match state.storage.quota().await {
        Ok(Some(quota)) => Ok(Json(ApiResponse::success(json!({
            "storage": {
                "backend": state.storage.name(),
                "used": quota.used_bytes,
                "total": quota.total_bytes,
                "free": quota.total_bytes.saturating_sub(quota.used_bytes),
            },
        })))),
        Ok(None) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(format!(
                "Storage backend '{}' does not report quota",
                state.storage.name()
            ))),
        )),
        Err(e) => {
            error!("Quota lookup failed: {}", e);
            Err(internal_error(e.to_string()))
        }
    }
}
