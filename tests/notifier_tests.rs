//! Notification fan-out behavior against mock channel endpoints.

use pagecast::config::Config;
use pagecast::services::notifier::{NotificationKind, Notifier};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_with_webhook(url: &str) -> Config {
    let mut config = Config::default();
    config.notify_webhook_url = Some(url.to_string());
    config
}

#[tokio::test]
async fn test_webhook_receives_success_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_webhook(&format!("{}/webhook", server.uri()));
    let notifier = Notifier::new(&config, reqwest::Client::new());
    assert!(notifier.is_enabled());

    notifier
        .notify_success("123_456", "IT-Solutions", "the post body")
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["kind"], "success");
    let text = payload["message"].as_str().unwrap();
    assert!(text.contains("IT-Solutions"));
    assert!(text.contains("https://facebook.com/123_456"));
}

#[tokio::test]
async fn test_webhook_failure_is_contained() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_with_webhook(&server.uri());
    let notifier = Notifier::new(&config, reqwest::Client::new());

    // Must not panic or error; the failure is logged and reported
    let results = notifier
        .deliver_all(NotificationKind::Failure, "publish blew up")
        .await;
    assert_eq!(results.len(), 1);
    assert!(!results[0].delivered);
}

#[tokio::test]
async fn test_telegram_channel_hits_bot_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST-TOKEN/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.telegram_api_base = server.uri();
    config.telegram_chat_id = Some("42".to_string());
    config.secrets.telegram_bot_token = Some("TEST-TOKEN".to_string());

    let notifier = Notifier::new(&config, reqwest::Client::new());
    let results = notifier
        .deliver_all(NotificationKind::Test, "ping")
        .await;

    assert_eq!(results.len(), 1);
    assert!(results[0].delivered, "{:?}", results[0].detail);

    let requests = server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["chat_id"], "42");
    assert_eq!(payload["text"], "ping");
}

#[tokio::test]
async fn test_both_channels_fan_out_independently() {
    let server = MockServer::start().await;
    // Telegram succeeds
    Mock::given(method("POST"))
        .and(path("/botTOK/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    // Webhook rejects
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.telegram_api_base = server.uri();
    config.telegram_chat_id = Some("7".to_string());
    config.secrets.telegram_bot_token = Some("TOK".to_string());
    config.notify_webhook_url = Some(format!("{}/hook", server.uri()));

    let notifier = Notifier::new(&config, reqwest::Client::new());
    let results = notifier
        .deliver_all(NotificationKind::Failure, "partial outage")
        .await;

    assert_eq!(results.len(), 2);
    let telegram = results.iter().find(|r| r.channel == "telegram").unwrap();
    let webhook = results.iter().find(|r| r.channel == "webhook").unwrap();
    assert!(telegram.delivered);
    assert!(!webhook.delivered);
}
