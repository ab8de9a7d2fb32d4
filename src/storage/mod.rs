//! Pluggable media storage backends.
//!
//! The upload endpoint writes through a single capability interface so
//! the rest of the service never depends on a concrete backend:
//! upload bytes under a name, delete by id, report quota when the
//! backend knows one. The backend is selected once at startup from
//! configuration.

pub mod local;
pub mod seaweed;

pub use local::LocalDiskStorage;
pub use seaweed::SeaweedStorage;

use crate::config::Config;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// A stored object as seen by clients
#[derive(Debug, Clone, Serialize)]
pub struct StoredObject {
    /// Backend-specific identifier, usable with `delete`
    pub id: String,
    /// URL the object is reachable under
    pub url: String,
    pub storage: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageQuota {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn upload(&self, bytes: Vec<u8>, name: &str) -> Result<StoredObject>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Quota when the backend tracks one; `None` means unsupported
    async fn quota(&self) -> Result<Option<StorageQuota>>;
}

/// Select the backend named in the configuration
pub fn backend_from_config(config: &Config) -> Result<Arc<dyn StorageBackend>> {
    match config.storage_backend.as_str() {
        "local" => Ok(Arc::new(LocalDiskStorage::new(
            config.upload_dir.clone(),
            "/temp-uploads".to_string(),
        ))),
        "seaweedfs" => {
            let master_url = config
                .seaweed_master_url
                .clone()
                .ok_or_else(|| anyhow!("seaweed_master_url missing for seaweedfs backend"))?;
            Ok(Arc::new(SeaweedStorage::new(master_url)))
        }
        other => Err(anyhow!("Unknown storage backend: '{}'", other)),
    }
}
