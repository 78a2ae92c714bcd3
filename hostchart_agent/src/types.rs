//! Data types sent to the client over WebSocket.
//! Keep this module minimal and stable; it defines the wire format.

use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HostDetail {
    pub server_id: u64,
    pub name: String,
    // 0..100, averaged over all cores
    pub cpu: f64,
    pub mem_used: u64,
    pub mem_total: u64,
    pub swap_used: u64,
    pub swap_total: u64,
    // bytes per second, summed over non-loopback interfaces
    pub net_in_speed: u64,
    pub net_out_speed: u64,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub error: String,
}
