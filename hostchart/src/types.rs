//! Types that mirror the agent's JSON schema, plus the per-chart samples derived from it.

use chrono::{DateTime, Local};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HostDetail {
    pub server_id: u64,
    pub name: String,
    // 0..100
    pub cpu: f64,
    pub mem_used: u64,
    pub mem_total: u64,
    pub swap_used: u64,
    pub swap_total: u64,
    // bytes per second
    pub net_in_speed: u64,
    pub net_out_speed: u64,
    #[serde(default)]
    pub uptime_secs: u64,
}

/// One reply frame: either a detail snapshot or an agent-side error.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum DetailReply {
    Detail(HostDetail),
    Error { error: String },
}

/// Normalized readings the charts plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostStatus {
    pub cpu: f64,
    pub mem: f64,
    pub swap: f64,
    /// MiB/s
    pub up: f64,
    /// MiB/s
    pub down: f64,
}

const MIB: f64 = 1024.0 * 1024.0;

fn pct(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

impl HostDetail {
    pub fn status(&self) -> HostStatus {
        HostStatus {
            cpu: self.cpu,
            mem: pct(self.mem_used, self.mem_total),
            swap: pct(self.swap_used, self.swap_total),
            up: self.net_out_speed as f64 / MIB,
            down: self.net_in_speed as f64 / MIB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuSample {
    pub timestamp: DateTime<Local>,
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemSample {
    pub timestamp: DateTime<Local>,
    pub mem_percent: f64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetSample {
    pub timestamp: DateTime<Local>,
    pub upload_mbs: f64,
    pub download_mbs: f64,
}

/// Anything plotted against a relative-time x axis.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Local>;
}

impl Timestamped for CpuSample {
    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

impl Timestamped for MemSample {
    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

impl Timestamped for NetSample {
    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}
