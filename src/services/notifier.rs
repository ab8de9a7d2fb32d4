// File: src/services/notifier.rs
use crate::config::Config;
use crate::constants::notify;
use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
    Test,
}

#[derive(Debug, Clone, Serialize)]
struct WebhookPayload {
    timestamp: DateTime<Utc>,
    kind: NotificationKind,
    message: String,
}

/// Delivery result for one channel, surfaced by the test endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResult {
    pub channel: &'static str,
    pub delivered: bool,
    pub detail: Option<String>,
}

/// Best-effort fan-out of publication outcomes to the configured
/// channels. Every channel failure is caught and logged independently;
/// nothing here ever affects the scheduler's outcome.
pub struct Notifier {
    client: Client,
    telegram: Option<TelegramChannel>,
    webhook_url: Option<String>,
}

struct TelegramChannel {
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl Notifier {
    pub fn new(config: &Config, client: Client) -> Self {
        let telegram = match (
            config.secrets.telegram_bot_token.clone(),
            config.telegram_chat_id.clone(),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramChannel {
                api_base: config.telegram_api_base.clone(),
                bot_token,
                chat_id,
            }),
            _ => None,
        };

        if telegram.is_none() && config.notify_webhook_url.is_none() {
            warn!("No notification channels configured; publish outcomes are log-only");
        }

        Self {
            client,
            telegram,
            webhook_url: config.notify_webhook_url.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.telegram.is_some() || self.webhook_url.is_some()
    }

    pub async fn notify_success(&self, post_id: &str, page_name: &str, message: &str) {
        let preview: String = message.chars().take(notify::MESSAGE_PREVIEW_CHARS).collect();
        let text = format!(
            "Post published successfully to {}!\n\n{}...\n\nLink: https://facebook.com/{}",
            page_name, preview, post_id
        );
        self.deliver_all(NotificationKind::Success, &text).await;
    }

    pub async fn notify_failure(&self, cause: &str) {
        let text = format!("Failed to publish post!\nError: {}", cause);
        self.deliver_all(NotificationKind::Failure, &text).await;
    }

    /// Fire every configured channel and report per-channel outcomes;
    /// used by the notification test endpoint.
    pub async fn deliver_all(&self, kind: NotificationKind, text: &str) -> Vec<ChannelResult> {
        let mut deliveries: Vec<BoxFuture<'_, ChannelResult>> = Vec::new();

        if let Some(channel) = &self.telegram {
            deliveries.push(Box::pin(self.send_telegram(channel, text)));
        }
        if let Some(url) = &self.webhook_url {
            deliveries.push(Box::pin(self.send_webhook(url, kind, text)));
        }

        if deliveries.is_empty() {
            debug!("Notification dropped, no channels configured: {:?}", kind);
            return Vec::new();
        }

        join_all(deliveries).await
    }

    async fn send_telegram(&self, channel: &TelegramChannel, text: &str) -> ChannelResult {
        let url = format!(
            "{}/bot{}/sendMessage",
            channel.api_base.trim_end_matches('/'),
            channel.bot_token
        );

        let request = self.client.post(&url).json(&json!({
            "chat_id": channel.chat_id,
            "text": text,
        }));

        match Self::bounded(request.send()).await {
            Ok(Ok(response)) if response.status().is_success() => {
                info!("Telegram notification sent");
                ChannelResult {
                    channel: "telegram",
                    delivered: true,
                    detail: None,
                }
            }
            Ok(Ok(response)) => {
                let status = response.status();
                warn!("Telegram returned status {}", status);
                ChannelResult {
                    channel: "telegram",
                    delivered: false,
                    detail: Some(format!("status {}", status)),
                }
            }
            Ok(Err(e)) => {
                warn!("Telegram delivery failed: {}", e);
                ChannelResult {
                    channel: "telegram",
                    delivered: false,
                    detail: Some(e.to_string()),
                }
            }
            Err(_) => {
                warn!("Telegram delivery timed out");
                ChannelResult {
                    channel: "telegram",
                    delivered: false,
                    detail: Some("timeout".to_string()),
                }
            }
        }
    }

    async fn send_webhook(&self, url: &str, kind: NotificationKind, text: &str) -> ChannelResult {
        let payload = WebhookPayload {
            timestamp: Utc::now(),
            kind,
            message: text.to_string(),
        };

        match Self::bounded(self.client.post(url).json(&payload).send()).await {
            Ok(Ok(response)) if response.status().is_success() => {
                info!("Webhook notification sent: {:?}", kind);
                ChannelResult {
                    channel: "webhook",
                    delivered: true,
                    detail: None,
                }
            }
            Ok(Ok(response)) => {
                let status = response.status();
                warn!("Notification webhook returned status {}", status);
                ChannelResult {
                    channel: "webhook",
                    delivered: false,
                    detail: Some(format!("status {}", status)),
                }
            }
            Ok(Err(e)) => {
                warn!("Webhook delivery failed: {}", e);
                ChannelResult {
                    channel: "webhook",
                    delivered: false,
                    detail: Some(e.to_string()),
                }
            }
            Err(_) => {
                warn!("Webhook delivery timed out");
                ChannelResult {
                    channel: "webhook",
                    delivered: false,
                    detail: Some("timeout".to_string()),
                }
            }
        }
    }

    async fn bounded<F, T>(future: F) -> Result<T, tokio::time::error::Elapsed>
    where
        F: std::future::Future<Output = T>,
    {
        timeout(notify::DELIVERY_TIMEOUT, future).await
    }
}
