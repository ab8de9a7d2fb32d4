// File: src/config/mod.rs
pub mod manager;
pub mod secrets;

use serde::{Deserialize, Serialize};

pub use manager::ConfigManager;
pub use secrets::Secrets;

use crate::constants::{defaults, graph, notify};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// IANA timezone the operator schedules posts in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Graph API base URL; only overridden by tests
    #[serde(default = "default_graph_api_base")]
    pub graph_api_base: String,

    /// Preferred page id; checked before the name keywords
    pub page_id: Option<String>,
    /// Lowercase keywords matched against page names when no id matches
    #[serde(default)]
    pub page_keywords: Vec<String>,

    /// Days before failed posts are pruned; unset keeps them forever
    pub failed_retention_days: Option<u32>,

    /// Storage backend for the generic upload endpoint: "local" or "seaweedfs"
    #[serde(default = "default_storage_backend")]
    pub storage_backend: String,
    pub seaweed_master_url: Option<String>,

    /// Notification channels; each is disabled when unset
    pub telegram_chat_id: Option<String>,
    pub notify_webhook_url: Option<String>,
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,

    // Populated from config/secrets.toml and environment overrides
    #[serde(skip)]
    pub secrets: Secrets,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_timezone() -> String {
    defaults::TIMEZONE.to_string()
}

fn default_public_dir() -> String {
    defaults::PUBLIC_DIR.to_string()
}

fn default_upload_dir() -> String {
    defaults::UPLOAD_DIR.to_string()
}

fn default_data_file() -> String {
    defaults::DATA_FILE.to_string()
}

fn default_graph_api_base() -> String {
    graph::DEFAULT_BASE_URL.to_string()
}

fn default_storage_backend() -> String {
    "local".to_string()
}

fn default_telegram_api_base() -> String {
    notify::TELEGRAM_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
            public_dir: default_public_dir(),
            upload_dir: default_upload_dir(),
            data_file: default_data_file(),
            graph_api_base: default_graph_api_base(),
            page_id: None,
            page_keywords: Vec::new(),
            failed_retention_days: None,
            storage_backend: default_storage_backend(),
            seaweed_master_url: None,
            telegram_chat_id: None,
            notify_webhook_url: None,
            telegram_api_base: default_telegram_api_base(),
            secrets: Secrets::default(),
        }
    }
}
