// File: src/storage/seaweed.rs
use super::{StorageBackend, StorageQuota, StoredObject};
use crate::constants;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct AssignResponse {
    fid: String,
    url: String,
    #[serde(rename = "publicUrl", default)]
    public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    locations: Vec<LookupLocation>,
}

#[derive(Debug, Deserialize)]
struct LookupLocation {
    url: String,
}

#[derive(Debug, Deserialize)]
struct MasterStatus {
    #[serde(rename = "Topology")]
    topology: Option<Topology>,
    #[serde(rename = "VolumeSizeLimitMB", default)]
    volume_size_limit_mb: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(rename = "Max", default)]
    max: u64,
    #[serde(rename = "Free", default)]
    free: u64,
}

/// SeaweedFS object store over the master's plain HTTP API:
/// assign a file id, then write the bytes to the returned volume server.
pub struct SeaweedStorage {
    client: Client,
    master_url: String,
}

impl SeaweedStorage {
    pub fn new(master_url: String) -> Self {
        let client = Client::builder()
            .timeout(constants::http::REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client for SeaweedStorage");

        Self {
            client,
            master_url: master_url.trim_end_matches('/').to_string(),
        }
    }

    /// Volume servers report bare host:port addresses
    fn with_scheme(host: &str) -> String {
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        }
    }

    /// Resolve the volume server holding `fid` (the part before the
    /// comma is the volume id).
    async fn locate_volume(&self, fid: &str) -> Result<String> {
        let volume_id = fid
            .split(',')
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("Invalid fid: '{}'", fid))?;

        let url = format!("{}/dir/lookup?volumeId={}", self.master_url, volume_id);
        let lookup: LookupResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let location = lookup
            .locations
            .first()
            .ok_or_else(|| anyhow!("No volume location for fid '{}'", fid))?;

        Ok(Self::with_scheme(&location.url))
    }
}

#[async_trait]
impl StorageBackend for SeaweedStorage {
    fn name(&self) -> &'static str {
        "seaweedfs"
    }

    async fn upload(&self, bytes: Vec<u8>, name: &str) -> Result<StoredObject> {
        let assign_url = format!("{}/dir/assign", self.master_url);
        let assign: AssignResponse = self
            .client
            .get(&assign_url)
            .send()
            .await
            .map_err(|e| anyhow!("SeaweedFS assign failed: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("SeaweedFS assign failed: {}", e))?
            .json()
            .await
            .map_err(|e| anyhow!("SeaweedFS assign response malformed: {}", e))?;

        debug!("Assigned fid {} on volume {}", assign.fid, assign.url);

        let size = bytes.len();
        let part = Part::bytes(bytes).file_name(name.to_string());
        let form = Form::new().part("file", part);

        let write_url = format!("{}/{}", Self::with_scheme(&assign.url), assign.fid);
        self.client
            .post(&write_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("SeaweedFS upload failed: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("SeaweedFS upload failed: {}", e))?;

        info!("Stored {} bytes in SeaweedFS as {}", size, assign.fid);

        let public_host = assign.public_url.as_deref().unwrap_or(&assign.url);
        Ok(StoredObject {
            url: format!("{}/{}", Self::with_scheme(public_host), assign.fid),
            id: assign.fid,
            storage: self.name(),
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let volume = self.locate_volume(id).await?;
        let url = format!("{}/{}", volume, id);
        self.client
            .delete(&url)
            .send()
            .await
            .map_err(|e| anyhow!("SeaweedFS delete failed: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow!("SeaweedFS delete failed: {}", e))?;
        debug!("Deleted {} from SeaweedFS", id);
        Ok(())
    }

    async fn quota(&self) -> Result<Option<StorageQuota>> {
        let url = format!("{}/dir/status", self.master_url);
        let status: MasterStatus = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let (topology, limit_mb) = match (status.topology, status.volume_size_limit_mb) {
            (Some(t), Some(l)) if t.max > 0 => (t, l),
            _ => return Ok(None),
        };

        let bytes_per_volume = limit_mb * 1024 * 1024;
        Ok(Some(StorageQuota {
            total_bytes: topology.max * bytes_per_volume,
            used_bytes: topology.max.saturating_sub(topology.free) * bytes_per_volume,
        }))
    }
}
