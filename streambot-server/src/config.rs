//! streambot-server/src/config.rs
//!
//! Startup configuration read from the process environment (after `.env` is loaded).

use std::fmt;

use streambot_core::Error;
use twilight_model::id::marker::{ChannelMarker, GuildMarker};
use twilight_model::id::Id;

pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
pub const TWITCH_CLIENT_ID: &str = "TWITCH_CLIENT_ID";
pub const TWITCH_CLIENT_SECRET: &str = "TWITCH_CLIENT_SECRET";
pub const GUILD_ID: &str = "GUILD_ID";
pub const CHANNEL_ID: &str = "CHANNEL_ID";

pub struct BotConfig {
    pub discord_token: String,
    pub twitch_client_id: String,
    pub twitch_client_secret: String,
    pub guild_id: Id<GuildMarker>,
    pub channel_id: Id<ChannelMarker>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Every value is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, Error> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
                _ => Err(Error::Config(format!("{key} is not set"))),
            }
        };

        Ok(Self {
            discord_token: required(DISCORD_TOKEN)?,
            twitch_client_id: required(TWITCH_CLIENT_ID)?,
            twitch_client_secret: required(TWITCH_CLIENT_SECRET)?,
            guild_id: parse_id(GUILD_ID, &required(GUILD_ID)?)?,
            channel_id: parse_id(CHANNEL_ID, &required(CHANNEL_ID)?)?,
        })
    }
}

fn parse_id<T>(key: &str, raw: &str) -> Result<Id<T>, Error> {
    raw.parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| Error::Config(format!("{key} must be a non-zero Discord ID, got '{raw}'")))
}

// Secrets stay out of logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("twitch_client_id", &self.twitch_client_id)
            .field("twitch_client_secret", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}
