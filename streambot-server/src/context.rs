//! streambot-server/src/context.rs
//!
//! Everything the bot needs at runtime, built once from the CLI args and `BotConfig`.

use std::sync::Arc;
use std::time::Duration;

use streambot_core::Error;
use streambot_core::platforms::discord::{DiscordLiveNotifier, DiscordPlatform};
use streambot_core::platforms::twitch::TwitchHelixClient;
use streambot_core::repositories::JsonStreamerRepository;
use streambot_core::services::LivePollService;
use streambot_core::services::discord::slashcommands::SlashCommandContext;
use tracing::info;

use crate::Args;
use crate::config::BotConfig;

pub struct ServerContext {
    pub streamers: Arc<JsonStreamerRepository>,
    pub live_poll: Arc<LivePollService>,
    pub discord: DiscordPlatform,
    pub poll_interval: Duration,
}

impl ServerContext {
    pub async fn new(args: &Args, config: BotConfig) -> Result<Self, Error> {
        let streamers = Arc::new(JsonStreamerRepository::load(&args.streamers_file).await?);

        let twitch = Arc::new(TwitchHelixClient::new(
            &config.twitch_client_id,
            &config.twitch_client_secret,
        )?);

        let discord = DiscordPlatform::new(config.discord_token, config.guild_id);
        let notifier = Arc::new(DiscordLiveNotifier::new(discord.http(), config.channel_id));

        let live_poll = Arc::new(LivePollService::new(streamers.clone(), twitch, notifier));
        info!("Polling Twitch every {}s", args.poll_interval_secs);

        Ok(Self {
            streamers,
            live_poll,
            discord,
            poll_interval: Duration::from_secs(args.poll_interval_secs),
        })
    }

    pub fn slash_commands(&self) -> SlashCommandContext {
        SlashCommandContext {
            streamers: self.streamers.clone(),
            live_poll: self.live_poll.clone(),
        }
    }
}
