// File: src/services/dedup.rs
use crate::constants::dedup;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// In-memory fingerprint cache that rejects duplicate immediate
/// submissions within a fixed window.
///
/// Entries are not persisted and play no part in the scheduled-post
/// lifecycle; this is purely the fast path guarding the immediate
/// posting endpoint against double submits.
pub struct DedupCache {
    entries: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::with_ttl(dedup::ENTRY_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Fingerprint of the content a duplicate would share
    pub fn fingerprint(message: &str, link: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(message.as_bytes());
        if let Some(link) = link {
            hasher.update(b"\n");
            hasher.update(link.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// True when `hash` was seen within the TTL window. Expired entries
    /// are purged opportunistically on every call.
    pub async fn is_duplicate(&self, hash: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, inserted| now.duration_since(*inserted) < self.ttl);

        if entries.contains_key(hash) {
            warn!("Duplicate post detected (hash: {})", hash);
            return true;
        }
        false
    }

    /// Record `hash`; called only after the publish actually succeeded,
    /// so a failed attempt can be resubmitted immediately.
    pub async fn record(&self, hash: &str) {
        self.entries
            .lock()
            .await
            .insert(hash.to_string(), Instant::now());
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new()
    }
}
