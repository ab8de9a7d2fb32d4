// Common types and utilities for API handlers

use axum::extract::multipart::Multipart;
use axum::{http::StatusCode, response::Json};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::errors::PublishError;

// Helper type for API responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub fn bad_request(message: String) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

pub fn internal_error(message: String) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(message)),
    )
}

/// Map a pipeline error to the status the submitter should see
pub fn publish_error_response(e: &PublishError) -> (StatusCode, Json<ApiResponse<()>>) {
    match e {
        PublishError::Validation { .. } => bad_request(e.to_string()),
        _ => internal_error(e.to_string()),
    }
}

/// One submitted multipart file, buffered in memory
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The fields the posting endpoints share
#[derive(Default)]
pub struct PostForm {
    pub message: Option<String>,
    pub link: Option<String>,
    pub schedule_time: Option<String>,
    pub post_hash: Option<String>,
    pub photo: Option<UploadedFile>,
    pub video: Option<UploadedFile>,
    pub file: Option<UploadedFile>,
}

/// Drain a multipart body into a `PostForm`. Unknown fields are ignored
/// so dashboard form changes do not break older servers.
pub async fn read_post_form(
    mut multipart: Multipart,
) -> Result<PostForm, (StatusCode, Json<ApiResponse<()>>)> {
    let mut form = PostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "message" => form.message = Some(read_text(field).await?),
            "link" => form.link = Some(read_text(field).await?).filter(|s| !s.is_empty()),
            "schedule_time" => form.schedule_time = Some(read_text(field).await?),
            "post_hash" => form.post_hash = Some(read_text(field).await?).filter(|s| !s.is_empty()),
            "photo" => form.photo = Some(read_file(field).await?),
            "video" => form.video = Some(read_file(field).await?),
            "file" => form.file = Some(read_file(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
) -> Result<String, (StatusCode, Json<ApiResponse<()>>)> {
    field
        .text()
        .await
        .map_err(|e| bad_request(format!("Unreadable field: {}", e)))
}

async fn read_file(
    field: axum::extract::multipart::Field<'_>,
) -> Result<UploadedFile, (StatusCode, Json<ApiResponse<()>>)> {
    let original_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(|s| s.to_string());
    let bytes = field
        .bytes()
        .await
        .map_err(|e| bad_request(format!("Unreadable file field: {}", e)))?
        .to_vec();

    Ok(UploadedFile {
        original_name,
        content_type,
        bytes,
    })
}

/// Random hex filename preserving the original extension
pub fn unique_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    format!("{:016x}{}", rand::random::<u64>(), ext)
}

/// Write an uploaded file into the managed upload directory and return
/// its public path.
pub async fn save_to_uploads(
    upload_dir: &str,
    file: &UploadedFile,
) -> Result<(String, PathBuf), (StatusCode, Json<ApiResponse<()>>)> {
    let filename = unique_filename(&file.original_name);
    let dir = PathBuf::from(upload_dir);

    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        error!("Failed to create upload directory {:?}: {}", dir, e);
        return Err(internal_error("Could not store upload".to_string()));
    }

    let path = dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &file.bytes).await {
        error!("Failed to write upload {:?}: {}", path, e);
        return Err(internal_error("Could not store upload".to_string()));
    }

    Ok((format!("/temp-uploads/{}", filename), path))
}
