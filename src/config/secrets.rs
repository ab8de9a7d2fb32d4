//! Secrets loader for API tokens and other sensitive configuration.
//!
//! Secrets are stored in a separate TOML file (config/secrets.toml) that
//! should be excluded from version control. Environment variables override
//! file values so deployments can inject tokens without touching disk.
//!
//! Example secrets.toml:
//! ```toml
//! [graph]
//! user_token = "EAAB..."
//!
//! [telegram]
//! bot_token = "123456:ABC..."
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Structure matching the secrets.toml file format
#[derive(Debug, Deserialize, Default)]
struct SecretsFile {
    #[serde(default)]
    graph: GraphSecrets,
    #[serde(default)]
    telegram: TelegramSecrets,
}

#[derive(Debug, Deserialize, Default)]
struct GraphSecrets {
    user_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TelegramSecrets {
    bot_token: Option<String>,
}

/// Resolved secrets carried inside `Config`
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// User-scoped Graph token the page credential is derived from
    pub user_token: Option<String>,
    /// Telegram bot token for the chat notification channel
    pub telegram_bot_token: Option<String>,
}

impl Secrets {
    /// Load secrets from the specified file path, then apply environment
    /// overrides (FB_USER_TOKEN, TELEGRAM_BOT_TOKEN). A missing file is
    /// not an error; tokens can come entirely from the environment.
    pub fn load(secrets_path: &Path) -> Result<Self> {
        let file = if secrets_path.exists() {
            let content = std::fs::read_to_string(secrets_path)
                .with_context(|| format!("Failed to read secrets file: {:?}", secrets_path))?;
            toml::from_str::<SecretsFile>(&content)
                .with_context(|| format!("Failed to parse secrets file: {:?}", secrets_path))?
        } else {
            warn!(
                "Secrets file not found at {:?}, tokens must come from the environment",
                secrets_path
            );
            SecretsFile::default()
        };

        let user_token = std::env::var("FB_USER_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.graph.user_token);

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.telegram.bot_token);

        info!(
            "Secrets resolved: graph token {}, telegram token {}",
            if user_token.is_some() { "present" } else { "missing" },
            if telegram_bot_token.is_some() { "present" } else { "missing" },
        );

        Ok(Self {
            user_token,
            telegram_bot_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_load_secrets_from_file() {
        std::env::remove_var("FB_USER_TOKEN");
        std::env::remove_var("TELEGRAM_BOT_TOKEN");

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[graph]
user_token = "file-user-token"

[telegram]
bot_token = "file-bot-token"
"#
        )
        .unwrap();

        let secrets = Secrets::load(file.path()).unwrap();
        assert_eq!(secrets.user_token.as_deref(), Some("file-user-token"));
        assert_eq!(secrets.telegram_bot_token.as_deref(), Some("file-bot-token"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[graph]
user_token = "file-user-token"
"#
        )
        .unwrap();

        std::env::set_var("FB_USER_TOKEN", "env-user-token");
        let secrets = Secrets::load(file.path()).unwrap();
        std::env::remove_var("FB_USER_TOKEN");

        assert_eq!(secrets.user_token.as_deref(), Some("env-user-token"));
    }

    #[test]
    #[serial]
    fn test_missing_file() {
        std::env::remove_var("FB_USER_TOKEN");
        std::env::remove_var("TELEGRAM_BOT_TOKEN");

        let secrets = Secrets::load(Path::new("/nonexistent/path/secrets.toml")).unwrap();
        assert!(secrets.user_token.is_none());
        assert!(secrets.telegram_bot_token.is_none());
    }
}
