// File: src/store/posts.rs
use super::{PostStatus, ScheduledPost};
use crate::errors::PublishError;
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Durable, ordered collection of scheduled posts.
///
/// The in-memory sequence and the on-disk JSON array are kept in lockstep:
/// every mutation rewrites the whole file before the caller proceeds, so a
/// crash between two posts loses nothing already persisted.
pub struct PostStore {
    path: PathBuf,
    posts: Mutex<Vec<ScheduledPost>>,
}

impl PostStore {
    /// Load the store from `path`, creating the parent directory and an
    /// empty file on first run.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow!("Failed to create store directory {:?}: {}", parent, e)
            })?;
        }

        let posts: Vec<ScheduledPost> = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| anyhow!("Corrupt store file {:?}: {}", path, e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tokio::fs::write(&path, "[]").await.map_err(|e| {
                    anyhow!("Failed to create store file {:?}: {}", path, e)
                })?;
                Vec::new()
            }
            Err(e) => return Err(anyhow!("Failed to read store file {:?}: {}", path, e)),
        };

        info!("Loaded {} scheduled post(s) from {:?}", posts.len(), path);

        Ok(Self {
            path,
            posts: Mutex::new(posts),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a post to the end of the sequence and persist.
    ///
    /// On a persistence failure the in-memory append is rolled back so the
    /// caller never confirms a submission that was not durably recorded.
    pub async fn append(&self, post: ScheduledPost) -> Result<(), PublishError> {
        let mut posts = self.posts.lock().await;
        posts.push(post);
        if let Err(e) = self.persist_locked(&posts).await {
            posts.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Snapshot of the live sequence in insertion order
    pub async fn snapshot(&self) -> Vec<ScheduledPost> {
        self.posts.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.posts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.lock().await.is_empty()
    }

    /// Apply `mutate` to the post with the given id, then persist.
    ///
    /// Returns an error if the id is unknown or the rewrite fails; the
    /// mutation stays in memory in the latter case, and callers treat the
    /// store as compromised for the rest of the tick.
    pub async fn update<F>(&self, id: &str, mutate: F) -> Result<(), PublishError>
    where
        F: FnOnce(&mut ScheduledPost),
    {
        let mut posts = self.posts.lock().await;
        let post = posts.iter_mut().find(|p| p.id == id).ok_or_else(|| {
            PublishError::Persistence {
                path: self.path.display().to_string(),
                reason: format!("post {} not found in store", id),
            }
        })?;
        mutate(post);
        self.persist_locked(&posts).await
    }

    /// Remove published posts, and failed posts older than the optional
    /// retention window, then persist. Returns the number removed.
    ///
    /// Failed posts without a retention window are kept indefinitely for
    /// operator inspection.
    pub async fn prune_completed(
        &self,
        failed_retention_days: Option<u32>,
    ) -> Result<usize, PublishError> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();

        let failed_cutoff = failed_retention_days.map(|days| {
            Utc::now().timestamp_millis() - (days as i64) * 24 * 60 * 60 * 1000
        });

        posts.retain(|p| match p.status {
            PostStatus::Published => false,
            PostStatus::Failed => match failed_cutoff {
                Some(cutoff) => p.created_at >= cutoff,
                None => true,
            },
            PostStatus::Pending => true,
        });

        let removed = before - posts.len();
        if removed > 0 {
            self.persist_locked(&posts).await?;
            info!("Pruned {} completed post(s) from store", removed);
        } else {
            debug!("Prune found nothing to remove");
        }

        Ok(removed)
    }

    /// Rewrite the whole store file. Writes to a temp file next to the
    /// target and renames it into place so a concurrent reader never sees
    /// a partial array.
    async fn persist_locked(&self, posts: &[ScheduledPost]) -> Result<(), PublishError> {
        let json = serde_json::to_vec_pretty(posts).map_err(|e| PublishError::Persistence {
            path: self.path.display().to_string(),
            reason: format!("serialization failed: {}", e),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|e| PublishError::Persistence {
                path: self.path.display().to_string(),
                reason: format!("write to {:?} failed: {}", tmp_path, e),
            })?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| {
                warn!("Failed to move {:?} into place: {}", tmp_path, e);
                PublishError::Persistence {
                    path: self.path.display().to_string(),
                    reason: format!("rename failed: {}", e),
                }
            })
    }
}
