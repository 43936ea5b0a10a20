//! One poll cycle: fetch who is live among the tracked streamers, announce the
//! newcomers, remember the result for the next cycle.
//!
//! The live set and the Twitch app token live behind a single mutex that is held
//! for the whole cycle. A second caller (e.g. `/recheck` while the timer's cycle
//! is running) waits for the first cycle to finish and then runs its own.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use twitch_oauth2::AccessToken;

use crate::Error;
use crate::platforms::twitch::HELIX_BATCH_LIMIT;
use crate::platforms::{LiveNotifier, StreamingApi};
use streambot_common::models::{LiveAnnouncement, LiveStream};
use streambot_common::traits::repository_traits::StreamerRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every batch was attempted and the live set was replaced.
    Completed,
    /// No app token could be issued; nothing was queried.
    NoCredential,
    /// Nothing is tracked, so there was nothing to ask Twitch about.
    NothingTracked,
    /// The tracked list could not be read.
    StoreUnavailable,
    /// Helix answered 401 on some batch; a fresh token was requested and the cycle abandoned.
    CredentialExpired,
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub batches: usize,
    pub failed_batches: usize,
    /// Newly-live logins whose post failed; they are left out of the live set.
    pub failed_announcements: usize,
    /// Size of the live set after the cycle.
    pub live: usize,
    /// Logins announced during this cycle.
    pub announced: Vec<String>,
}

impl CycleReport {
    fn new(outcome: CycleOutcome) -> Self {
        Self {
            outcome,
            batches: 0,
            failed_batches: 0,
            failed_announcements: 0,
            live: 0,
            announced: Vec::new(),
        }
    }
}

#[derive(Default)]
struct PollState {
    live: HashSet<String>,
    token: Option<AccessToken>,
}

pub struct LivePollService {
    streamers: Arc<dyn StreamerRepository>,
    api: Arc<dyn StreamingApi>,
    notifier: Arc<dyn LiveNotifier>,
    state: Mutex<PollState>,
}

impl LivePollService {
    pub fn new(
        streamers: Arc<dyn StreamerRepository>,
        api: Arc<dyn StreamingApi>,
        notifier: Arc<dyn LiveNotifier>,
    ) -> Self {
        Self {
            streamers,
            api,
            notifier,
            state: Mutex::new(PollState::default()),
        }
    }

    /// Snapshot of the logins seen live in the last completed cycle.
    pub async fn live_set(&self) -> HashSet<String> {
        self.state.lock().await.live.clone()
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let mut state = self.state.lock().await;

        // 1) Make sure we hold an app token.
        let token = match state.token.clone() {
            Some(t) => t,
            None => match self.api.fetch_app_token().await {
                Ok(t) => {
                    info!("Acquired Twitch app token");
                    state.token = Some(t.clone());
                    t
                }
                Err(e) => {
                    warn!("Skipping poll cycle, no Twitch credential: {}", e);
                    return CycleReport::new(CycleOutcome::NoCredential);
                }
            },
        };

        // 2) Read the tracked list fresh every cycle.
        let tracked = match self.streamers.tracked_streamers().await {
            Ok(list) => list,
            Err(e) => {
                error!("Skipping poll cycle, could not read tracked streamers: {}", e);
                return CycleReport::new(CycleOutcome::StoreUnavailable);
            }
        };
        if tracked.is_empty() {
            debug!("No streamers tracked; nothing to poll");
            let mut report = CycleReport::new(CycleOutcome::NothingTracked);
            report.live = state.live.len();
            return report;
        }

        // 3) Query in Helix-sized batches.
        let mut report = CycleReport::new(CycleOutcome::Completed);
        let mut found: HashMap<String, LiveStream> = HashMap::new();

        for batch in tracked.chunks(HELIX_BATCH_LIMIT) {
            report.batches += 1;
            match self.api.get_live_streams(&token, batch).await {
                Ok(streams) => {
                    for stream in streams {
                        found.insert(stream.login.clone(), stream);
                    }
                }
                Err(Error::CredentialExpired) => {
                    // 4) Re-issue once and abandon this cycle; the next one retries everything.
                    warn!("Twitch token expired; re-issuing and abandoning this cycle");
                    state.token = None;
                    match self.api.fetch_app_token().await {
                        Ok(t) => state.token = Some(t),
                        Err(e) => warn!("Re-issuing Twitch token failed: {}", e),
                    }
                    report.outcome = CycleOutcome::CredentialExpired;
                    report.live = state.live.len();
                    return report;
                }
                Err(e) => {
                    report.failed_batches += 1;
                    warn!(
                        "Batch {} ({} logins) failed, contributing nothing this cycle: {}",
                        report.batches,
                        batch.len(),
                        e
                    );
                }
            }
        }

        // 5/6) Announce whoever was not live last time.
        let mut unannounced: HashSet<String> = HashSet::new();
        for (login, stream) in &found {
            if state.live.contains(login) {
                continue;
            }
            let announcement = LiveAnnouncement::from_stream(stream);
            match self.notifier.announce(&announcement).await {
                Ok(()) => {
                    info!("Announced {} going live", login);
                    report.announced.push(login.clone());
                }
                Err(e) => {
                    error!("Failed to announce {} going live, retrying next cycle: {}", login, e);
                    report.failed_announcements += 1;
                    unannounced.insert(login.clone());
                }
            }
        }

        // 7) Replace the live set wholesale. A failed post stays out so it is retried.
        state.live = found
            .into_keys()
            .filter(|login| !unannounced.contains(login))
            .collect();
        report.live = state.live.len();

        info!(
            "Poll cycle done: {} batch(es), {} failed, {} live, {} newly announced, {} post(s) failed",
            report.batches,
            report.failed_batches,
            report.live,
            report.announced.len(),
            report.failed_announcements
        );
        report
    }
}
