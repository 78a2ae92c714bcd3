//! Background sampler: periodically collects host detail and refreshes the JSON
//! cache, so WS replies just read and send cached text.

use crate::metrics::collect_detail;
use crate::state::AppState;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

pub fn spawn_sampler(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let detail = collect_detail(&state).await;
            match serde_json::to_string(&detail) {
                Ok(js) => {
                    debug!(cpu = detail.cpu, rx = detail.net_in_speed, tx = detail.net_out_speed, "sampled");
                    *state.last_json.write().await = js;
                }
                Err(e) => warn!("serialize host detail: {e}"),
            }
        }
    })
}
