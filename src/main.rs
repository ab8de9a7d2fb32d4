// File: src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use pagecast::config::ConfigManager;
use pagecast::constants;
use pagecast::health::SystemProbe;
use pagecast::scheduler::{PublicationScheduler, TickRunner};
use pagecast::services::{DedupCache, Notifier, PostPublisher};
use pagecast::storage::backend_from_config;
use pagecast::store::PostStore;
use pagecast::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("pagecast=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting Page Publishing Manager");

    // Load configuration
    let config_manager = ConfigManager::new("config".to_string()).await?;
    let config = config_manager.get_current_config();

    // Ensure the managed upload directory exists before anything serves it
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Load the scheduled-post store
    let store = Arc::new(PostStore::load(&config.data_file).await?);
    info!("Post store initialized with {} record(s)", store.len().await);

    // Shared outbound HTTP client with bounded timeouts
    let client = reqwest::Client::builder()
        .timeout(constants::http::REQUEST_TIMEOUT)
        .connect_timeout(constants::http::CONNECT_TIMEOUT)
        .build()?;

    // Publication pipeline (credential resolver + media uploader + feed)
    let publisher = Arc::new(PostPublisher::new(&config, client.clone()));
    if config.secrets.user_token.is_none() {
        warn!("FB_USER_TOKEN not configured - publications will fail until it is set");
    }

    // Notification fan-out
    let notifier = Arc::new(Notifier::new(&config, client.clone()));
    if notifier.is_enabled() {
        info!("Notification channels ready");
    } else {
        warn!("No notification channels configured");
    }

    // Duplicate guard for the immediate posting endpoint
    let dedup = Arc::new(DedupCache::new());

    // Media storage backend for the generic upload endpoint
    let storage = backend_from_config(&config)?;
    info!("Storage backend: {}", storage.name());

    // Host statistics probe
    let probe = Arc::new(SystemProbe::new());

    // Initialize and start the publication scheduler
    let runner = TickRunner::new(
        store.clone(),
        publisher.clone(),
        notifier.clone(),
        config.failed_retention_days,
    );
    let scheduler = PublicationScheduler::new(runner).await?;
    scheduler.start().await?;
    info!("Cron jobs running: publication tick every minute, retention prune daily");

    // Start web server
    let state = AppState::new(
        config.clone(),
        store,
        publisher,
        notifier,
        dedup,
        storage,
        probe,
    );
    start_web_server(state).await?;

    Ok(())
}
