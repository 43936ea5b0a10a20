use async_trait::async_trait;
use crate::error::Error;

/// Ordered, duplicate-free list of tracked Twitch logins.
///
/// Every mutation is persisted before it returns; implementations must serialize
/// concurrent mutations so interleaved read-modify-write cycles cannot lose updates.
#[async_trait]
pub trait StreamerRepository: Send + Sync {
    /// Normalizes `login`, appends it and persists. Returns the stored (normalized) login.
    /// Fails with `Error::AlreadyTracked` if present.
    async fn add_streamer(&self, login: &str) -> Result<String, Error>;

    /// Normalizes `login`, removes it and persists. Returns the removed login.
    /// Fails with `Error::NotTracked` if absent.
    async fn remove_streamer(&self, login: &str) -> Result<String, Error>;

    /// The tracked logins in insertion order, or `Error::Empty` when nothing is tracked.
    async fn list_streamers(&self) -> Result<Vec<String>, Error> {
        let all = self.tracked_streamers().await?;
        if all.is_empty() {
            return Err(Error::Empty);
        }
        Ok(all)
    }

    /// Same as `list_streamers` but an empty list is a normal result.
    async fn tracked_streamers(&self) -> Result<Vec<String>, Error>;
}
