//! Host health reporting.
//!
//! One-shot reads of memory, load, disk and network state for the stats
//! endpoint. Every probe degrades to a zeroed section when its source is
//! unavailable instead of failing the whole report.

mod stats;

pub use stats::SystemProbe;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HostStats {
    pub uptime_seconds: u64,
    pub platform: &'static str,
    pub cpu: CpuStats,
    pub ram: MemStats,
    pub disk: Vec<DiskStats>,
    pub network: NetStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CpuStats {
    pub cores: usize,
    /// One-minute load average as a percentage of available cores
    pub usage: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskStats {
    pub fs: String,
    pub size: u64,
    pub used: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetStats {
    /// Cumulative received bytes across interfaces (loopback excluded)
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}
