use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    Shard,
    MessageSender,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::id::marker::GuildMarker;
use twilight_model::id::Id;

use crate::Error;
use crate::platforms::ConnectionStatus;
use crate::services::discord::slashcommands::{
    handle_interaction_create, register_guild_slash_commands, SlashCommandContext,
};

/// The shard runner:
///   - registers the guild commands once shard 0 is READY
///   - hands every interaction to its own task so a slow `/recheck` never blocks the shard.
async fn shard_runner(
    mut shard: Shard,
    http: Arc<HttpClient>,
    guild_id: Id<GuildMarker>,
    commands: SlashCommandContext,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    let wanted = EventTypeFlags::READY | EventTypeFlags::INTERACTION_CREATE;
    while let Some(item) = shard.next_event(wanted).await {
        match item {
            Ok(Event::Ready(ready)) => {
                info!(
                    "Shard {shard_id} => READY as {} (ID={})",
                    ready.user.name, ready.user.id
                );
                if shard_id == 0 {
                    if let Err(e) =
                        register_guild_slash_commands(&http, ready.application.id, guild_id).await
                    {
                        error!("Slash command registration failed: {e}");
                    }
                }
            }
            Ok(Event::InteractionCreate(interaction_create)) => {
                let interaction = interaction_create.0;
                let http = http.clone();
                let ctx = commands.clone();
                tokio::spawn(async move {
                    let interaction_id = interaction.id;
                    if let Err(e) = handle_interaction_create(http, ctx, interaction).await {
                        error!("Interaction {interaction_id} failed: {e}");
                    }
                });
            }
            Ok(other) => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
            }
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// Gateway connection plus the shared HTTP client.
///
/// The HTTP client exists from construction on, so the live notifier can be
/// built before the gateway is connected.
pub struct DiscordPlatform {
    token: String,
    guild_id: Id<GuildMarker>,
    connection_status: ConnectionStatus,
    http: Arc<HttpClient>,
    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,
}

impl DiscordPlatform {
    pub fn new(token: String, guild_id: Id<GuildMarker>) -> Self {
        let http = Arc::new(
            ClientBuilder::new()
                .token(token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );
        Self {
            token,
            guild_id,
            connection_status: ConnectionStatus::Disconnected,
            http,
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
        }
    }

    pub fn http(&self) -> Arc<HttpClient> {
        self.http.clone()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection_status.clone()
    }

    /// Opens the recommended number of shards and spawns a runner for each.
    pub async fn connect(&mut self, commands: SlashCommandContext) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        if self.token.is_empty() {
            return Err(Error::Config("Discord token is empty".into()));
        }

        // Interactions arrive without any privileged intent.
        let config = Config::new(self.token.clone(), Intents::GUILDS);

        let shards = gateway::create_recommended(&self.http, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let http_for_shard = self.http.clone();
            let commands_for_shard = commands.clone();
            let guild_id = self.guild_id;
            let handle = tokio::spawn(async move {
                shard_runner(shard, http_for_shard, guild_id, commands_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        debug!("(DiscordPlatform) {} shard(s) running", self.shard_tasks.len());
        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    pub async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        // Gracefully close shards
        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        // Wait for them
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();
        Ok(())
    }
}
