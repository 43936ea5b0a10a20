// ================================================================
// File: streambot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Tracked-streamer store:
    #[error("{0} is already being tracked")]
    AlreadyTracked(String),

    #[error("{0} is not being tracked")]
    NotTracked(String),

    #[error("No streamers are currently being tracked")]
    Empty,

    // Twitch polling:
    #[error("Twitch credential unavailable: {0}")]
    CredentialUnavailable(String),

    #[error("Twitch credential expired")]
    CredentialExpired,

    #[error("Stream query failed: {0}")]
    QueryFailed(String),

    // Startup:
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}
