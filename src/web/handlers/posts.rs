// Posting endpoints: scheduled submissions and immediate publication

use axum::extract::{Multipart, State};
use axum::response::Json;
use chrono_tz::Tz;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::common::{
    bad_request, publish_error_response, read_post_form, save_to_uploads, ApiResponse, ApiResult,
    PostForm,
};
use crate::constants::media;
use crate::media::{optimize_image, validate_image};
use crate::scheduling::parse_schedule_time;
use crate::services::DedupCache;
use crate::store::{MediaAttachment, ScheduledPost};
use crate::web::AppState;

/// POST /api/schedule-post - append a pending post to the store
pub async fn schedule_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Value> {
    let form = read_post_form(multipart).await?;

    let message = require_message(&form)?;
    let schedule_raw = form
        .schedule_time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| bad_request("Message and schedule time are required".to_string()))?;

    if form.photo.is_some() && form.video.is_some() {
        return Err(bad_request(
            "A post can carry a photo or a video, not both".to_string(),
        ));
    }

    // Validated at config load; parse cannot fail here
    let tz: Tz = state.config.timezone.parse().unwrap_or(chrono_tz::UTC);
    let schedule_time =
        parse_schedule_time(schedule_raw, tz).map_err(|e| bad_request(e.to_string()))?;

    let mut photo_path = None;
    let mut video_path = None;
    if let Some(file) = &form.photo {
        let (public_path, _) = save_to_uploads(&state.config.upload_dir, file).await?;
        photo_path = Some(public_path);
    } else if let Some(file) = &form.video {
        let (public_path, _) = save_to_uploads(&state.config.upload_dir, file).await?;
        video_path = Some(public_path);
    }

    let post = ScheduledPost::new(
        message,
        form.link.clone(),
        photo_path,
        video_path,
        schedule_time,
    );
    let post_id = post.id.clone();

    if let Err(e) = state.store.append(post).await {
        error!("Failed to persist scheduled post: {}", e);
        return Err(publish_error_response(&e));
    }

    info!(
        "Scheduled post {} for {} ({})",
        post_id, schedule_time, state.config.timezone
    );

    Ok(Json(ApiResponse::success(json!({
        "message": "Post scheduled successfully!",
        "post_id": post_id,
        "schedule_time": schedule_time,
    }))))
}

/// POST /api/post - immediate publication with duplicate protection
pub async fn publish_post(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Value> {
    let form = read_post_form(multipart).await?;
    let message = require_message(&form)?;

    // Client-supplied fingerprint takes precedence, original behavior
    let hash = form
        .post_hash
        .clone()
        .unwrap_or_else(|| DedupCache::fingerprint(&message, form.link.as_deref()));

    if state.dedup.is_duplicate(&hash).await {
        return Err(bad_request(
            "Duplicate post detected. Please modify your content.".to_string(),
        ));
    }

    let media = prepare_immediate_media(&state, &form).await?;

    match state
        .publisher
        .publish(&message, form.link.as_deref(), media.as_ref())
        .await
    {
        Ok(published) => {
            state.dedup.record(&hash).await;
            info!("Immediate post created: {}", published.post_id);
            Ok(Json(ApiResponse::success(json!({
                "message": format!("Posted to {}!", published.page_name),
                "post_id": published.post_id,
                "posted_by": published.page_name,
            }))))
        }
        Err(e) => {
            error!("Immediate post failed: {}", e);
            Err(publish_error_response(&e))
        }
    }
}

/// GET /api/page-info - resolved publishing target
pub async fn get_page_info(State(state): State<AppState>) -> ApiResult<Value> {
    match state.publisher.page_identity().await {
        Ok((id, name)) => Ok(Json(ApiResponse::success(json!({
            "page": { "id": id, "name": name },
        })))),
        Err(e) => {
            error!("Page info lookup failed: {}", e);
            Err(publish_error_response(&e))
        }
    }
}

fn require_message(
    form: &PostForm,
) -> Result<String, (axum::http::StatusCode, Json<ApiResponse<()>>)> {
    form.message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .ok_or_else(|| bad_request("Message cannot be empty".to_string()))
}

/// Store an attached photo/video for the immediate path. Photos are
/// validated and re-encoded before upload; a validation failure is
/// logged and the original bytes are published anyway.
async fn prepare_immediate_media(
    state: &AppState,
    form: &PostForm,
) -> Result<Option<MediaAttachment>, (axum::http::StatusCode, Json<ApiResponse<()>>)> {
    if let Some(file) = &form.photo {
        let (public_path, disk_path) = save_to_uploads(&state.config.upload_dir, file).await?;

        let check_path = disk_path.clone();
        let processed = tokio::task::spawn_blocking(move || {
            let check = validate_image(&check_path);
            optimize_image(
                &check_path,
                media::OPTIMIZE_MAX_WIDTH,
                media::OPTIMIZE_MAX_HEIGHT,
                media::OPTIMIZE_QUALITY,
            );
            check
        })
        .await;

        match processed {
            Ok(check) if check.valid => info!(
                "Image valid: {} ({})",
                check.format.as_deref().unwrap_or("?"),
                check.dimensions.as_deref().unwrap_or("?")
            ),
            Ok(check) => warn!(
                "Image validation: {}",
                check.error.as_deref().unwrap_or("unknown reason")
            ),
            Err(e) => warn!("Image processing task failed: {}", e),
        }

        return Ok(Some(MediaAttachment {
            path: public_path,
            is_video: false,
        }));
    }

    if let Some(file) = &form.video {
        let (public_path, _) = save_to_uploads(&state.config.upload_dir, file).await?;
        return Ok(Some(MediaAttachment {
            path: public_path,
            is_video: true,
        }));
    }

    Ok(None)
}
