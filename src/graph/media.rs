// File: src/graph/media.rs
use super::PageCredential;
use crate::errors::PublishError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: Option<String>,
    post_id: Option<String>,
}

/// Uploads a local media file to the page's photo or video sub-resource
/// and returns the attachment handle the feed post references.
pub struct MediaUploader {
    client: Client,
    base_url: String,
}

impl MediaUploader {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { client, base_url }
    }

    pub async fn upload(
        &self,
        local_path: &Path,
        is_video: bool,
        credential: &PageCredential,
    ) -> Result<String, PublishError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| PublishError::MediaRead {
                path: local_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let (sub_resource, file_name, mime) = if is_video {
            ("videos", "video.mp4", "video/mp4")
        } else {
            ("photos", "photo.jpg", "image/jpeg")
        };

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| PublishError::UploadRejected {
                message: format!("invalid mime type {}: {}", mime, e),
            })?;

        let form = Form::new()
            .part("source", part)
            .text("access_token", credential.token.clone());

        let url = super::endpoint(
            &self.base_url,
            &format!("{}/{}", credential.page_id, sub_resource),
        );

        info!(
            "Uploading {} to {}/{}",
            local_path.display(),
            credential.page_id,
            sub_resource
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::UploadRejected {
                message: format!("upload request failed: {}", e),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::UploadRejected {
                message: format!("upload response unreadable: {}", e),
            })?;

        if !status.is_success() {
            return Err(PublishError::UploadRejected {
                message: super::error_message(status, &body),
            });
        }

        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|e| PublishError::UploadRejected {
                message: format!("malformed upload response: {}", e),
            })?;

        let attachment_id = parsed.id.or(parsed.post_id).ok_or_else(|| {
            PublishError::UploadRejected {
                message: format!("upload response missing id: {}", body.trim()),
            }
        })?;

        info!("Media uploaded: {}", attachment_id);
        Ok(attachment_id)
    }
}
