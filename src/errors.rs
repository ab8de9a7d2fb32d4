//! Custom error types for the publication pipeline
//!
//! Provides structured error handling with context for the different
//! failure scenarios a post can hit between submission and publication.

use std::fmt;

/// Main error type for the publication pipeline
#[derive(Debug)]
pub enum PublishError {
    /// Bad or missing input at submission time (surfaced as 4xx)
    Validation { field: String, reason: String },

    /// The resolver could not obtain a usable page credential
    Credential(CredentialError),

    /// Local media file missing or unreadable at publish time
    MediaRead { path: String, reason: String },

    /// The platform rejected the media upload; upstream message verbatim
    UploadRejected { message: String },

    /// The platform rejected the feed creation; upstream message verbatim
    PublishRejected { message: String },

    /// The store could not durably record a mutation
    Persistence { path: String, reason: String },
}

/// Credential resolution error variants
#[derive(Debug)]
pub enum CredentialError {
    /// The user token has no pages attached
    NoPagesFound,

    /// Pages exist but none is usable as a publishing target
    TargetPageNotFound { available: Vec<String> },

    /// The accounts lookup itself failed (network, auth, malformed body)
    Lookup { reason: String },
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Validation { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            PublishError::Credential(e) => write!(f, "Credential error: {}", e),
            PublishError::MediaRead { path, reason } => {
                write!(f, "Failed to read media '{}': {}", path, reason)
            }
            PublishError::UploadRejected { message } => {
                write!(f, "Media upload rejected: {}", message)
            }
            PublishError::PublishRejected { message } => {
                write!(f, "Feed publish rejected: {}", message)
            }
            PublishError::Persistence { path, reason } => {
                write!(f, "Failed to persist store '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::NoPagesFound => {
                write!(f, "No pages found for the configured user token")
            }
            CredentialError::TargetPageNotFound { available } => {
                write!(
                    f,
                    "Target page not found in user accounts. Available: {}",
                    available.join(", ")
                )
            }
            CredentialError::Lookup { reason } => {
                write!(f, "Page lookup failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for PublishError {}
impl std::error::Error for CredentialError {}

impl From<CredentialError> for PublishError {
    fn from(err: CredentialError) -> Self {
        PublishError::Credential(err)
    }
}

impl PublishError {
    /// Validation helper used by the submission endpoints
    pub fn validation(field: &str, reason: &str) -> Self {
        PublishError::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
