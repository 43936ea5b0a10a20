use chrono::{DateTime, Utc};

/// Default thumbnail size substituted into Twitch's `{width}x{height}` template.
pub const THUMBNAIL_WIDTH: u32 = 1280;
pub const THUMBNAIL_HEIGHT: u32 = 720;

/// One live broadcast as reported by the "who is live" query.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveStream {
    /// Lower-case login, matches the tracked identifier.
    pub login: String,
    pub display_name: String,
    pub title: String,
    /// e.g. `https://static-cdn.jtvnw.net/previews-ttv/live_user_x-{width}x{height}.jpg`
    pub thumbnail_url_template: String,
    pub game_name: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl LiveStream {
    pub fn channel_url(&self) -> String {
        format!("https://twitch.tv/{}", self.login)
    }

    pub fn thumbnail_url(&self, width: u32, height: u32) -> String {
        self.thumbnail_url_template
            .replace("{width}", &width.to_string())
            .replace("{height}", &height.to_string())
    }
}
