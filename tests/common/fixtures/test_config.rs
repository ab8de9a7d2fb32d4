//! Test configuration wired to temp directories and a mock Graph server

use pagecast::config::Config;
use pagecast::services::{DedupCache, Notifier, PostPublisher};
use pagecast::store::PostStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A self-contained service environment for integration tests: every
/// path lives under one temp directory that disappears with the test.
pub struct TestEnv {
    pub config: Arc<Config>,
    pub store: Arc<PostStore>,
    pub publisher: Arc<PostPublisher>,
    pub notifier: Arc<Notifier>,
    pub dedup: Arc<DedupCache>,
    // Held for its Drop
    pub dir: TempDir,
}

impl TestEnv {
    pub async fn new(graph_base_url: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();

        let mut config = Config::default();
        config.public_dir = root.join("public").display().to_string();
        config.upload_dir = root.join("public/temp-uploads").display().to_string();
        config.data_file = root.join("data/scheduled-posts.json").display().to_string();
        config.graph_api_base = graph_base_url.to_string();
        config.page_id = Some("133112064223614".to_string());
        config.page_keywords = vec!["it".to_string(), "solution".to_string()];
        config.timezone = "Africa/Cairo".to_string();
        config.secrets.user_token = Some("test-user-token".to_string());

        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .expect("upload dir");

        let config = Arc::new(config);
        let client = reqwest::Client::new();

        let store = Arc::new(
            PostStore::load(&config.data_file)
                .await
                .expect("store load"),
        );
        let publisher = Arc::new(PostPublisher::new(&config, client.clone()));
        let notifier = Arc::new(Notifier::new(&config, client));
        let dedup = Arc::new(DedupCache::new());

        Self {
            config,
            store,
            publisher,
            notifier,
            dedup,
            dir,
        }
    }

    /// Drop a media file into the managed upload directory and return
    /// its public path, the way the submission endpoint would.
    pub async fn stage_media(&self, name: &str, bytes: &[u8]) -> String {
        let path = PathBuf::from(&self.config.upload_dir).join(name);
        tokio::fs::write(&path, bytes).await.expect("stage media");
        format!("/temp-uploads/{}", name)
    }

    pub fn media_disk_path(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.config.upload_dir).join(name)
    }
}
