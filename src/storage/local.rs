// File: src/storage/local.rs
use super::{StorageBackend, StorageQuota, StoredObject};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Stores uploads on the local disk under the managed upload directory,
/// where the web server serves them as static assets.
pub struct LocalDiskStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: String) -> Self {
        Self {
            root: root.into(),
            public_prefix,
        }
    }

    /// Filenames are generated server-side; reject anything that could
    /// escape the upload directory anyway.
    fn safe_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(anyhow!("Invalid object name: '{}'", name));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageBackend for LocalDiskStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn upload(&self, bytes: Vec<u8>, name: &str) -> Result<StoredObject> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.safe_path(name)?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| anyhow!("Failed to write {:?}: {}", path, e))?;

        info!("Stored {} bytes locally as {:?}", bytes.len(), path);

        Ok(StoredObject {
            id: name.to_string(),
            url: format!("{}/{}", self.public_prefix, name),
            storage: self.name(),
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.safe_path(id)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| anyhow!("Failed to delete {:?}: {}", path, e))?;
        debug!("Deleted local object {:?}", path);
        Ok(())
    }

    async fn quota(&self) -> Result<Option<StorageQuota>> {
        // Local disk has no meaningful per-backend quota
        Ok(None)
    }
}
