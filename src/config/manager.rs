// File: src/config/manager.rs
use super::{Config, Secrets};
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);

        let mut config: Config = if Path::new(&main_config_path).exists() {
            let content = fs::read_to_string(&main_config_path).await.map_err(|e| {
                anyhow!("Failed to read main config {}: {}", main_config_path, e)
            })?;
            toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse main config: {}", e))?
        } else {
            info!(
                "No config file at {}, falling back to built-in defaults",
                main_config_path
            );
            Config::default()
        };

        config.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| anyhow!("Invalid timezone in config: '{}'", config.timezone))?;

        if config.storage_backend == "seaweedfs" && config.seaweed_master_url.is_none() {
            return Err(anyhow!(
                "storage_backend = \"seaweedfs\" requires seaweed_master_url"
            ));
        }

        let secrets_path = format!("{}/secrets.toml", config_dir);
        config.secrets = Secrets::load(Path::new(&secrets_path))?;

        info!(
            "Configuration loaded: timezone {}, storage backend {}, telegram {}, webhook {}",
            config.timezone,
            config.storage_backend,
            if config.telegram_chat_id.is_some() { "on" } else { "off" },
            if config.notify_webhook_url.is_some() { "on" } else { "off" },
        );

        Ok(config)
    }
}
