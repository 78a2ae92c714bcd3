//! Chart presenter state and the reducer that folds poll results into it.

use chrono::{DateTime, Local};

use crate::error::FetchFailure;
use crate::history::Window;
use crate::poller::Poll;
use crate::types::{CpuSample, HostDetail, HostStatus, MemSample, NetSample};

#[derive(Debug, Clone, Default)]
pub struct CpuPanel {
    window: Window<CpuSample>,
}

impl CpuPanel {
    pub fn on_sample(&mut self, s: &HostStatus, at: DateTime<Local>) {
        self.window = self.window.appended(CpuSample {
            timestamp: at,
            cpu_percent: s.cpu,
        });
    }

    pub fn window(&self) -> &Window<CpuSample> {
        &self.window
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemPanel {
    window: Window<MemSample>,
}

impl MemPanel {
    pub fn on_sample(&mut self, s: &HostStatus, at: DateTime<Local>) {
        self.window = self.window.appended(MemSample {
            timestamp: at,
            mem_percent: s.mem,
            swap_percent: s.swap,
        });
    }

    pub fn window(&self) -> &Window<MemSample> {
        &self.window
    }
}

#[derive(Debug, Clone, Default)]
pub struct NetPanel {
    window: Window<NetSample>,
}

impl NetPanel {
    pub fn on_sample(&mut self, s: &HostStatus, at: DateTime<Local>) {
        self.window = self.window.appended(NetSample {
            timestamp: at,
            upload_mbs: s.up,
            download_mbs: s.down,
        });
    }

    pub fn window(&self) -> &Window<NetSample> {
        &self.window
    }

    pub fn y_bound(&self) -> f64 {
        crate::axis::upload_download_bound(&self.window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing received yet.
    Loading,
    Displaying,
    Errored,
}

/// What the chart area shows right now.
pub enum View<'a> {
    Empty,
    Error(&'a FetchFailure),
    Charts {
        detail: &'a HostDetail,
        status: HostStatus,
    },
}

/// Folds poll results into the three panels. An error hides the charts but
/// keeps their windows, so the next success picks up where it left off.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub cpu: CpuPanel,
    pub mem: MemPanel,
    pub net: NetPanel,
    latest: Option<HostDetail>,
    error: Option<FetchFailure>,
    last_seq: Option<u64>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `poll` was already applied.
    pub fn apply(&mut self, poll: &Poll) -> bool {
        if self.last_seq == Some(poll.seq) {
            return false;
        }
        self.last_seq = Some(poll.seq);
        match &poll.result {
            Ok(detail) => {
                let status = detail.status();
                self.cpu.on_sample(&status, poll.at);
                self.mem.on_sample(&status, poll.at);
                self.net.on_sample(&status, poll.at);
                self.latest = Some(detail.clone());
                self.error = None;
            }
            Err(e) => self.error = Some(e.clone()),
        }
        true
    }

    pub fn phase(&self) -> Phase {
        match (&self.error, &self.latest) {
            (Some(_), _) => Phase::Errored,
            (None, Some(_)) => Phase::Displaying,
            (None, None) => Phase::Loading,
        }
    }

    pub fn latest(&self) -> Option<&HostDetail> {
        self.latest.as_ref()
    }

    pub fn view(&self) -> View<'_> {
        if let Some(e) = &self.error {
            return View::Error(e);
        }
        match &self.latest {
            Some(detail) => View::Charts {
                detail,
                status: detail.status(),
            },
            None => View::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(cpu: f64) -> HostDetail {
        HostDetail {
            server_id: 1,
            name: "web-1".into(),
            cpu,
            mem_used: 1,
            mem_total: 4,
            swap_used: 0,
            swap_total: 0,
            net_in_speed: 0,
            net_out_speed: 0,
            uptime_secs: 60,
        }
    }

    fn ok(seq: u64, cpu: f64) -> Poll {
        Poll {
            seq,
            at: Local::now(),
            result: Ok(detail(cpu)),
        }
    }

    fn failed(seq: u64, msg: &str) -> Poll {
        Poll {
            seq,
            at: Local::now(),
            result: Err(FetchFailure::new(msg)),
        }
    }

    #[test]
    fn starts_loading_with_nothing_to_show() {
        let d = Dashboard::new();
        assert_eq!(d.phase(), Phase::Loading);
        assert!(matches!(d.view(), View::Empty));
    }

    #[test]
    fn each_new_poll_appends_to_every_window() {
        let mut d = Dashboard::new();
        for seq in 1..=3 {
            assert!(d.apply(&ok(seq, seq as f64)));
        }
        assert_eq!(d.phase(), Phase::Displaying);
        assert_eq!(d.cpu.window().len(), 3);
        assert_eq!(d.mem.window().len(), 3);
        assert_eq!(d.net.window().len(), 3);
        assert_eq!(d.cpu.window().latest().map(|s| s.cpu_percent), Some(3.0));
        assert_eq!(d.mem.window().latest().map(|s| s.mem_percent), Some(25.0));
    }

    #[test]
    fn same_poll_is_not_applied_twice() {
        let mut d = Dashboard::new();
        let p = ok(1, 5.0);
        assert!(d.apply(&p));
        assert!(!d.apply(&p));
        assert_eq!(d.cpu.window().len(), 1);
    }

    #[test]
    fn failure_hides_charts_and_success_restores_history() {
        let mut d = Dashboard::new();
        d.apply(&ok(1, 10.0));
        d.apply(&ok(2, 20.0));
        d.apply(&failed(3, "connection refused"));
        assert_eq!(d.phase(), Phase::Errored);
        match d.view() {
            View::Error(e) => assert_eq!(e.message, "connection refused"),
            _ => panic!("expected error view"),
        }
        assert_eq!(d.cpu.window().len(), 2);

        d.apply(&ok(4, 30.0));
        assert_eq!(d.phase(), Phase::Displaying);
        let cpu: Vec<f64> = d.cpu.window().iter().map(|s| s.cpu_percent).collect();
        assert_eq!(cpu, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn failure_before_first_sample_is_still_an_error() {
        let mut d = Dashboard::new();
        d.apply(&failed(1, "dns"));
        assert_eq!(d.phase(), Phase::Errored);
        assert!(d.latest().is_none());
    }

    #[test]
    fn windows_stay_capped() {
        let mut d = Dashboard::new();
        for seq in 1..=40 {
            d.apply(&ok(seq, 1.0));
        }
        assert_eq!(d.cpu.window().len(), 30);
        assert_eq!(d.net.window().len(), 30);
    }
}
