use chrono::{DateTime, Utc};

use crate::models::stream::{LiveStream, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};

pub const TWITCH_PURPLE: u32 = 0x9146FF;

/// Platform-neutral content of a "went live" message. The Discord notifier turns this
/// into an embed; keeping it plain data lets the formatting be tested without twilight.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveAnnouncement {
    /// Plain message content sent alongside the embed (the mention).
    pub content: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub thumbnail_url: String,
    pub color: u32,
    pub game: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl LiveAnnouncement {
    pub fn from_stream(stream: &LiveStream) -> Self {
        let description = if stream.title.trim().is_empty() {
            None
        } else {
            Some(stream.title.clone())
        };
        let game = stream
            .game_name
            .as_ref()
            .filter(|g| !g.trim().is_empty())
            .cloned();

        Self {
            content: "@everyone".to_string(),
            title: format!("{} is LIVE!", stream.display_name),
            url: stream.channel_url(),
            description,
            thumbnail_url: stream.thumbnail_url(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT),
            color: TWITCH_PURPLE,
            game,
            started_at: stream.started_at,
        }
    }
}
