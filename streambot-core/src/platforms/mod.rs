// File: src/platforms/mod.rs

use async_trait::async_trait;
use twitch_oauth2::AccessToken;

use crate::Error;
use streambot_common::models::{LiveAnnouncement, LiveStream};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// The two Twitch calls the poller needs: app token issuance and "who is live".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamingApi: Send + Sync {
    /// Client-credentials grant. Any failure is reported as `Error::CredentialUnavailable`.
    async fn fetch_app_token(&self) -> Result<AccessToken, Error>;

    /// Returns the live streams among `logins` (at most `HELIX_BATCH_LIMIT` per call).
    /// A 401 answer is `Error::CredentialExpired`; other failures are `Error::QueryFailed`.
    async fn get_live_streams(
        &self,
        token: &AccessToken,
        logins: &[String],
    ) -> Result<Vec<LiveStream>, Error>;
}

/// Broadcast destination for "went live" announcements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveNotifier: Send + Sync {
    async fn announce(&self, announcement: &LiveAnnouncement) -> Result<(), Error>;
}

pub mod twitch;
pub mod discord;
