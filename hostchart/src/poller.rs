//! One shared poller per host: fetches on a fixed interval and publishes each
//! result to every subscriber through a broadcast channel, so a subscriber that
//! only drains between redraws still sees every poll.
//!
//! A fetch is awaited before the next tick is taken and missed ticks are
//! skipped, so a slow agent never has more than one request in flight.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::FetchFailure;
use crate::types::HostDetail;

/// Anything that can produce a host snapshot on demand.
pub trait SampleSource: Send + 'static {
    fn fetch(
        &mut self,
        server_id: u64,
    ) -> impl Future<Output = Result<HostDetail, FetchFailure>> + Send;
}

/// One completed poll. `seq` increases by one per poll and identifies it.
#[derive(Debug, Clone)]
pub struct Poll {
    pub seq: u64,
    pub at: DateTime<Local>,
    pub result: Result<HostDetail, FetchFailure>,
}

pub type PollReceiver = broadcast::Receiver<Poll>;

// Polls a subscriber may fall behind by before the oldest are dropped
pub const POLL_BUFFER: usize = 64;

/// Owns the polling task; dropping it stops polling.
pub struct PollerHandle {
    task: JoinHandle<()>,
    tx: broadcast::Sender<Poll>,
}

impl PollerHandle {
    /// Receives every poll published after this call.
    pub fn subscribe(&self) -> PollReceiver {
        self.tx.subscribe()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts polling. The returned receiver was subscribed before the task
/// started, so it sees the first poll too.
pub fn spawn_poller<S: SampleSource>(
    mut source: S,
    server_id: u64,
    period: Duration,
) -> (PollerHandle, PollReceiver) {
    let (tx, rx) = broadcast::channel(POLL_BUFFER);
    let publisher = tx.clone();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut seq = 0u64;
        loop {
            ticker.tick().await;
            let result = source.fetch(server_id).await;
            seq += 1;
            match &result {
                Ok(d) => debug!(seq, host = %d.name, "poll ok"),
                Err(e) => warn!(seq, error = %e, "poll failed"),
            }
            let poll = Poll {
                seq,
                at: Local::now(),
                result,
            };
            // Err only means nobody is subscribed right now
            let _ = publisher.send(poll);
        }
    });
    (PollerHandle { task, tx }, rx)
}
