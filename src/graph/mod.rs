//! Graph API client layer.
//!
//! Three small collaborators cover everything the publication pipeline
//! needs from the remote platform:
//! - `credentials` - derives and caches the page-scoped token
//! - `media` - uploads photo/video attachments ahead of the feed post
//! - `feed` - creates the final visible feed entry
//!
//! All endpoints are addressed relative to a configurable base URL so
//! tests can point the clients at a mock server.

pub mod credentials;
pub mod feed;
pub mod media;

pub use credentials::{CredentialResolver, PageCredential};
pub use feed::FeedPublisher;
pub use media::MediaUploader;

use crate::constants::graph::API_VERSION;

/// Build a versioned Graph endpoint URL
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), API_VERSION, path)
}

/// Pull the human-readable message out of a Graph error body, falling
/// back to the raw body when it is not the usual `{"error":{"message"}}`
/// envelope. Upstream text is passed through verbatim for diagnosis.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        });

    match parsed {
        Some(message) => message,
        None => format!("HTTP {}: {}", status, body.trim()),
    }
}
