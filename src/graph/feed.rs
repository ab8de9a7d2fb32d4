// File: src/graph/feed.rs
use super::PageCredential;
use crate::errors::PublishError;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct FeedResponse {
    id: String,
}

/// Creates the final visible feed entry on the target page.
///
/// Exactly one feed-creation call happens per post whether or not media
/// is present; attachments are referenced by the handle the uploader
/// returned so the platform never fabricates a second implicit post.
pub struct FeedPublisher {
    client: Client,
    base_url: String,
}

impl FeedPublisher {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { client, base_url }
    }

    pub async fn publish(
        &self,
        message: &str,
        link: Option<&str>,
        attachment_id: Option<&str>,
        credential: &PageCredential,
    ) -> Result<String, PublishError> {
        let mut form: Vec<(&str, String)> = vec![
            ("message", message.to_string()),
            ("access_token", credential.token.clone()),
        ];
        if let Some(link) = link {
            form.push(("link", link.to_string()));
        }
        if let Some(attachment_id) = attachment_id {
            form.push(("object_attachment", attachment_id.to_string()));
        }

        let url = super::endpoint(&self.base_url, &format!("{}/feed", credential.page_id));

        info!(
            "Creating feed post on {} ({})",
            credential.page_name, credential.page_id
        );

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| PublishError::PublishRejected {
                message: format!("feed request failed: {}", e),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::PublishRejected {
                message: format!("feed response unreadable: {}", e),
            })?;

        if !status.is_success() {
            return Err(PublishError::PublishRejected {
                message: super::error_message(status, &body),
            });
        }

        let parsed: FeedResponse =
            serde_json::from_str(&body).map_err(|e| PublishError::PublishRejected {
                message: format!("malformed feed response: {}", e),
            })?;

        info!("Feed post created: {}", parsed.id);
        Ok(parsed.id)
    }
}
