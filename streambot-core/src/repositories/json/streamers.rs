// File: streambot-core/src/repositories/json/streamers.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::Error;
use streambot_common::models::normalize_login;
use streambot_common::traits::repository_traits::StreamerRepository;

/// Tracked-streamer list persisted as a JSON array of strings.
///
/// The whole file is rewritten on every mutation. The mutex is held across
/// check, write and commit, so memory only changes after the file write succeeded.
pub struct JsonStreamerRepository {
    path: PathBuf,
    streamers: Mutex<Vec<String>>,
}

impl JsonStreamerRepository {
    /// Reads `path` if it exists; a missing file means "nothing tracked yet".
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let raw: Vec<String> = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No streamer file at {}; starting with an empty list", path.display());
                Vec::new()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut streamers: Vec<String> = Vec::with_capacity(raw.len());
        for entry in raw {
            let login = normalize_login(&entry);
            if login.is_empty() {
                warn!("Skipping blank entry in {}", path.display());
                continue;
            }
            if streamers.contains(&login) {
                warn!("Dropping duplicate entry '{}' from {}", login, path.display());
                continue;
            }
            streamers.push(login);
        }

        info!("Loaded {} tracked streamer(s) from {}", streamers.len(), path.display());
        Ok(Self {
            path,
            streamers: Mutex::new(streamers),
        })
    }

    async fn persist(&self, streamers: &[String]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(streamers)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Persisted {} streamer(s) to {}", streamers.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl StreamerRepository for JsonStreamerRepository {
    async fn add_streamer(&self, login: &str) -> Result<String, Error> {
        let login = normalize_login(login);
        if login.is_empty() {
            return Err(Error::Parse("streamer name is empty".into()));
        }

        let mut guard = self.streamers.lock().await;
        if guard.contains(&login) {
            return Err(Error::AlreadyTracked(login));
        }

        let mut updated = guard.clone();
        updated.push(login.clone());
        self.persist(&updated).await?;
        *guard = updated;

        info!("Now tracking '{}'", login);
        Ok(login)
    }

    async fn remove_streamer(&self, login: &str) -> Result<String, Error> {
        let login = normalize_login(login);

        let mut guard = self.streamers.lock().await;
        let Some(idx) = guard.iter().position(|s| *s == login) else {
            return Err(Error::NotTracked(login));
        };

        let mut updated = guard.clone();
        updated.remove(idx);
        self.persist(&updated).await?;
        *guard = updated;

        info!("No longer tracking '{}'", login);
        Ok(login)
    }

    async fn tracked_streamers(&self) -> Result<Vec<String>, Error> {
        Ok(self.streamers.lock().await.clone())
    }
}
