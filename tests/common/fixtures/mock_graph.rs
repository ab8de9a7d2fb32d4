//! Mock Graph API server for testing the publication pipeline
//!
//! Simulates the three remote endpoints the pipeline touches: the
//! accounts lookup, the photo/video upload sub-resources and the feed
//! creation call.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub struct MockGraphServer {
    pub server: MockServer,
    pub base_url: String,
    pub page_id: String,
}

impl MockGraphServer {
    /// Start a mock server presenting a single usable page
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self {
            server,
            base_url,
            page_id: "133112064223614".to_string(),
        }
    }

    /// Mock the accounts lookup; `expected_calls` pins how many lookups
    /// the resolver is allowed to make (credential caching contract).
    pub async fn mock_accounts(&self, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/v19.0/me/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": self.page_id,
                        "name": "IT-Solutions",
                        "access_token": "page-token-1"
                    }
                ]
            })))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    /// Accounts lookup that returns no pages at all
    pub async fn mock_accounts_empty(&self) {
        Mock::given(method("GET"))
            .and(path("/v19.0/me/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_photo_upload_success(&self, attachment_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/photos", self.page_id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": attachment_id })),
            )
            .mount(&self.server)
            .await;
    }

    /// Upload rejection carrying a Graph-style error envelope
    pub async fn mock_photo_upload_failure(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/photos", self.page_id)))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": message, "type": "GraphMethodException", "code": 100 }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_video_upload_success(&self, attachment_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/videos", self.page_id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": attachment_id })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_feed_success(&self, post_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/feed", self.page_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": post_id })))
            .mount(&self.server)
            .await;
    }

    /// Feed creation mock that must never be reached
    pub async fn mock_feed_never_called(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/feed", self.page_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "unreachable" })))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_feed_failure(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v19.0/{}/feed", self.page_id)))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Bodies of the feed-creation calls, in arrival order
    pub async fn feed_request_bodies(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().ends_with("/feed"))
            .map(|r: &Request| String::from_utf8_lossy(&r.body).to_string())
            .collect()
    }

    /// Number of media upload calls (photos + videos) received
    pub async fn media_upload_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| {
                r.url.path().ends_with("/photos") || r.url.path().ends_with("/videos")
            })
            .count()
    }
}
