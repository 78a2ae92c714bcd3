//! Host detail collection using sysinfo.

use std::time::Instant;

use sysinfo::System;

use crate::state::{AppState, NetCounters};
use crate::types::HostDetail;

fn counted(iface: &str) -> bool {
    !iface.starts_with("lo")
}

/// Bytes/s since `prev`; zero on the first sample and when counters go backwards.
pub fn net_rates(prev: Option<&NetCounters>, rx_total: u64, tx_total: u64, now: Instant) -> (u64, u64) {
    let Some(p) = prev else { return (0, 0) };
    let dt = now.duration_since(p.at).as_secs_f64().max(1e-6);
    let rx = (rx_total.saturating_sub(p.rx_total) as f64 / dt).round() as u64;
    let tx = (tx_total.saturating_sub(p.tx_total) as f64 / dt).round() as u64;
    (rx, tx)
}

pub async fn collect_detail(state: &AppState) -> HostDetail {
    let (cpu, mem_total, mem_used, swap_total, swap_used) = {
        let mut sys = state.sys.lock().await;
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let mem_total = sys.total_memory();
        (
            f64::from(sys.global_cpu_usage()).clamp(0.0, 100.0),
            mem_total,
            mem_total.saturating_sub(sys.available_memory()),
            sys.total_swap(),
            sys.used_swap(),
        )
    };

    let (rx_total, tx_total) = {
        let mut nets = state.networks.lock().await;
        nets.refresh(true);
        nets.iter()
            .filter(|(name, _)| counted(name))
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            })
    };

    let (net_in_speed, net_out_speed) = {
        let now = Instant::now();
        let mut last = state.last_net.lock().await;
        let rates = net_rates(last.as_ref(), rx_total, tx_total, now);
        *last = Some(NetCounters {
            rx_total,
            tx_total,
            at: now,
        });
        rates
    };

    HostDetail {
        server_id: state.server_id,
        name: state.hostname.clone(),
        cpu,
        mem_used,
        mem_total,
        swap_used,
        swap_total,
        net_in_speed,
        net_out_speed,
        uptime_secs: System::uptime(),
    }
}
