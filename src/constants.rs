//! Application-wide constants for timeouts, limits, and schedules
//!
//! Central repository for all configuration constants and magic numbers
//! so timeouts and intervals live in one place.

#![allow(dead_code)] // Some constants are defined for future use

use std::time::Duration;

/// HTTP client timeout constants
pub mod http {
    use super::Duration;

    /// Default timeout for outbound HTTP requests (Graph API, notifications)
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Graph API constants
pub mod graph {
    /// Graph API version prefix used for every remote call
    pub const API_VERSION: &str = "v19.0";

    /// Default Graph API base URL (overridable for tests)
    pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
}

/// Scheduler cron expressions (6-field: sec min hour day month dow)
pub mod schedule {
    /// Publication tick - every minute
    pub const TICK_CRON: &str = "0 * * * * *";

    /// Retention prune - daily at midnight
    pub const PRUNE_CRON: &str = "0 0 0 * * *";
}

/// Deduplication cache constants
pub mod dedup {
    use super::Duration;

    /// How long a post fingerprint blocks identical resubmissions
    pub const ENTRY_TTL: Duration = Duration::from_secs(10 * 60);
}

/// Notification delivery constants
pub mod notify {
    use super::Duration;

    /// Per-channel delivery timeout
    pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default Telegram Bot API base URL (overridable for tests)
    pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

    /// Characters of the post message included in notification text
    pub const MESSAGE_PREVIEW_CHARS: usize = 150;
}

/// Media handling constants
pub mod media {
    /// Maximum accepted upload size for multipart bodies
    pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

    /// Maximum width applied when optimizing photos
    pub const OPTIMIZE_MAX_WIDTH: u32 = 1200;

    /// Maximum height applied when optimizing photos
    pub const OPTIMIZE_MAX_HEIGHT: u32 = 1200;

    /// JPEG quality applied when optimizing photos
    pub const OPTIMIZE_QUALITY: u8 = 80;
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP listen port
    pub const PORT: u16 = 5000;

    /// Default bind host
    pub const HOST: &str = "0.0.0.0";

    /// Default posting timezone (IANA name)
    pub const TIMEZONE: &str = "Africa/Cairo";

    /// Default directory served as static assets
    pub const PUBLIC_DIR: &str = "public";

    /// Default directory for uploaded media, relative to the public dir
    pub const UPLOAD_DIR: &str = "public/temp-uploads";

    /// Default path of the scheduled-post store
    pub const DATA_FILE: &str = "data/scheduled-posts.json";
}
