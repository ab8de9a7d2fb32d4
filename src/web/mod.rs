// File: src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::start_web_server;

use std::sync::Arc;

use crate::config::Config;
use crate::health::SystemProbe;
use crate::services::{DedupCache, Notifier, PostPublisher};
use crate::storage::StorageBackend;
use crate::store::PostStore;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<PostStore>,
    pub publisher: Arc<PostPublisher>,
    pub notifier: Arc<Notifier>,
    pub dedup: Arc<DedupCache>,
    pub storage: Arc<dyn StorageBackend>,
    pub probe: Arc<SystemProbe>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: Arc<PostStore>,
        publisher: Arc<PostPublisher>,
        notifier: Arc<Notifier>,
        dedup: Arc<DedupCache>,
        storage: Arc<dyn StorageBackend>,
        probe: Arc<SystemProbe>,
    ) -> Self {
        Self {
            config,
            store,
            publisher,
            notifier,
            dedup,
            storage,
            probe,
        }
    }
}
