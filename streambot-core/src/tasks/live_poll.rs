use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::services::live_poll_service::LivePollService;

/// Default spacing between two poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Spawns the background task that runs a poll cycle every `period`.
///
/// The first tick fires immediately. Each cycle is awaited inside the loop, so
/// a slow cycle only delays the next tick; ticks never overlap. The task ends
/// once `shutdown_rx` observes `true`.
pub fn spawn_live_poll_task(
    service: Arc<LivePollService>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("Live poll task started (every {}s)", period.as_secs());
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = service.run_cycle().await;
                    debug!("Scheduled poll cycle finished: {:?}", report.outcome);
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Live poll task stopping");
                        break;
                    }
                }
            }
        }
    })
}
