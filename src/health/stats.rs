// File: src/health/stats.rs
use super::{CpuStats, DiskStats, HostStats, MemStats, NetStats};
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Collects host statistics from /proc and `df`.
pub struct SystemProbe {
    started: Instant,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub async fn collect(&self) -> HostStats {
        HostStats {
            uptime_seconds: self.started.elapsed().as_secs(),
            platform: std::env::consts::OS,
            cpu: self.cpu().await.unwrap_or_default(),
            ram: self.memory().await.unwrap_or_default(),
            disk: self.disks().await.unwrap_or_default(),
            network: self.network().await.unwrap_or_default(),
        }
    }

    async fn cpu(&self) -> Option<CpuStats> {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let loadavg = tokio::fs::read_to_string("/proc/loadavg").await.ok()?;
        let one_minute: f64 = loadavg.split_whitespace().next()?.parse().ok()?;

        Some(CpuStats {
            cores,
            usage: (one_minute / cores as f64 * 100.0 * 10.0).round() / 10.0,
        })
    }

    async fn memory(&self) -> Option<MemStats> {
        let meminfo = tokio::fs::read_to_string("/proc/meminfo").await.ok()?;

        let mut total = None;
        let mut available = None;
        for line in meminfo.lines() {
            if let Some(rest) = line.strip_prefix("MemTotal:") {
                total = parse_kb(rest);
            } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
                available = parse_kb(rest);
            }
        }

        let total = total?;
        let free = available.unwrap_or(0);
        Some(MemStats {
            total,
            used: total.saturating_sub(free),
            free,
        })
    }

    async fn disks(&self) -> Option<Vec<DiskStats>> {
        let output = Command::new("df").arg("-k").output().await.ok()?;
        if !output.status.success() {
            debug!("df -k exited with {}", output.status);
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let disks = stdout
            .lines()
            .skip(1)
            .filter_map(|line| {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 6 || !parts[0].starts_with('/') {
                    return None;
                }
                Some(DiskStats {
                    fs: parts[0].to_string(),
                    size: parts[1].parse::<u64>().ok()? * 1024,
                    used: parts[2].parse::<u64>().ok()? * 1024,
                    available: parts[3].parse::<u64>().ok()? * 1024,
                })
            })
            .collect();

        Some(disks)
    }

    async fn network(&self) -> Option<NetStats> {
        let content = tokio::fs::read_to_string("/proc/net/dev").await.ok()?;

        let mut stats = NetStats::default();
        for line in content.lines().skip(2) {
            let Some((iface, rest)) = line.split_once(':') else {
                continue;
            };
            if iface.trim() == "lo" {
                continue;
            }
            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.len() >= 9 {
                stats.rx_bytes += fields[0].parse::<u64>().unwrap_or(0);
                stats.tx_bytes += fields[8].parse::<u64>().unwrap_or(0);
            }
        }

        Some(stats)
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_kb(value: &str) -> Option<u64> {
    value
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse::<u64>()
        .ok()
        .map(|kb| kb * 1024)
}
