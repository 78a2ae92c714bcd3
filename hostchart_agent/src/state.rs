//! Shared agent state: sysinfo handles, network counters and the hot JSON cache.

use std::sync::Arc;
use std::time::Instant;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};
use tokio::sync::{Mutex, RwLock};

pub type SharedSystem = Arc<Mutex<System>>;
pub type SharedNetworks = Arc<Mutex<Networks>>;

/// Interface byte totals at the previous sample; rates are diffs against these.
#[derive(Debug, Clone, Copy)]
pub struct NetCounters {
    pub rx_total: u64,
    pub tx_total: u64,
    pub at: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub server_id: u64,
    pub hostname: String,

    // Persistent sysinfo handles
    pub sys: SharedSystem,
    pub networks: SharedNetworks,
    pub last_net: Arc<Mutex<Option<NetCounters>>>,

    // Last serialized HostDetail for fast WS responses
    pub last_json: Arc<RwLock<String>>,
}

impl AppState {
    pub fn new(server_id: u64, hostname: String) -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::everything());
        let sys = System::new_with_specifics(refresh_kind);
        Self {
            server_id,
            hostname,
            sys: Arc::new(Mutex::new(sys)),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            last_net: Arc::new(Mutex::new(None)),
            last_json: Arc::new(RwLock::new(String::new())),
        }
    }
}
