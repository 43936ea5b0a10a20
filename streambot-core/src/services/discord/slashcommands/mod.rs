// File: streambot-core/src/services/discord/slashcommands/mod.rs

pub mod add_streamer;
pub mod list_streamers;
pub mod recheck;
pub mod remove_streamer;

use std::sync::Arc;

use tracing::{debug, info, warn};
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::{
        command::Command,
        interaction::{
            application_command::{CommandData, CommandOptionValue},
            Interaction, InteractionData,
        },
    },
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::{ApplicationMarker, GuildMarker},
    id::Id,
};

use crate::Error;
use crate::services::live_poll_service::LivePollService;
use streambot_common::traits::repository_traits::StreamerRepository;

/// Option shared by `/addstreamer` and `/removestreamer`.
pub const STREAMER_NAME_OPTION: &str = "streamer_name";

/// Everything a command handler may touch.
#[derive(Clone)]
pub struct SlashCommandContext {
    pub streamers: Arc<dyn StreamerRepository>,
    pub live_poll: Arc<LivePollService>,
}

/// Text to send back to the invoking user. The first message answers the
/// interaction; any further ones go out as follow-ups, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    pub messages: Vec<String>,
    pub ephemeral: bool,
}

impl CommandReply {
    pub fn private(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            ephemeral: true,
        }
    }

    pub fn private_chunks(messages: Vec<String>) -> Self {
        Self {
            messages,
            ephemeral: true,
        }
    }
}

pub fn guild_commands() -> Vec<Command> {
    vec![
        recheck::create_recheck_command().build(),
        list_streamers::create_list_streamers_command().build(),
        add_streamer::create_add_streamer_command().build(),
        remove_streamer::create_remove_streamer_command().build(),
    ]
}

/// Registers the four commands on the configured guild (instant propagation,
/// unlike global commands).
pub async fn register_guild_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    guild_id: Id<GuildMarker>,
) -> Result<(), Error> {
    let commands = guild_commands();

    http.interaction(application_id)
        .set_guild_commands(guild_id, &commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register guild slash commands: {e}")))?;

    info!("Registered {} slash commands in guild {}", commands.len(), guild_id);
    Ok(())
}

/// Dispatch one slash command interaction.
pub async fn handle_interaction_create(
    http: Arc<HttpClient>,
    ctx: SlashCommandContext,
    interaction: Interaction,
) -> Result<(), Error> {
    // Only handle ApplicationCommand interactions:
    let Some(InteractionData::ApplicationCommand(cmd_data)) = &interaction.data else {
        debug!("Ignoring non-command interaction {}", interaction.id);
        return Ok(());
    };

    let name = cmd_data.name.as_str();
    info!("Slash command /{} from interaction {}", name, interaction.id);

    match name {
        recheck::COMMAND_NAME => {
            recheck::handle_recheck_interaction(&http, &interaction, &ctx).await
        }
        list_streamers::COMMAND_NAME => {
            let reply = list_streamers::run_list_streamers(ctx.streamers.as_ref()).await;
            send_reply(&http, &interaction, &reply).await
        }
        add_streamer::COMMAND_NAME => {
            let reply = match string_option(cmd_data, STREAMER_NAME_OPTION) {
                Some(streamer) => add_streamer::run_add_streamer(ctx.streamers.as_ref(), streamer).await,
                None => CommandReply::private("Missing `streamer_name`."),
            };
            send_reply(&http, &interaction, &reply).await
        }
        remove_streamer::COMMAND_NAME => {
            let reply = match string_option(cmd_data, STREAMER_NAME_OPTION) {
                Some(streamer) => remove_streamer::run_remove_streamer(ctx.streamers.as_ref(), streamer).await,
                None => CommandReply::private("Missing `streamer_name`."),
            };
            send_reply(&http, &interaction, &reply).await
        }
        other => {
            warn!("Unrecognized slash command /{}", other);
            send_reply(&http, &interaction, &CommandReply::private(format!("Unrecognized command: {other}"))).await
        }
    }
}

pub fn string_option<'a>(data: &'a CommandData, name: &str) -> Option<&'a str> {
    data.options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| match &opt.value {
            CommandOptionValue::String(s) => Some(s.as_str()),
            _ => None,
        })
}

fn reply_flags(reply: &CommandReply) -> Option<MessageFlags> {
    reply.ephemeral.then_some(MessageFlags::EPHEMERAL)
}

/// Sends `reply` as the interaction response plus follow-ups.
pub async fn send_reply(
    http: &Arc<HttpClient>,
    interaction: &Interaction,
    reply: &CommandReply,
) -> Result<(), Error> {
    let client = http.interaction(interaction.application_id);
    let mut messages = reply.messages.iter();

    let first = messages.next().cloned().unwrap_or_default();
    client
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(InteractionResponseData {
                    content: Some(first),
                    flags: reply_flags(reply),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error responding to interaction: {e}")))?;

    for chunk in messages {
        let mut followup = client.create_followup(&interaction.token).content(chunk);
        if let Some(flags) = reply_flags(reply) {
            followup = followup.flags(flags);
        }
        followup
            .await
            .map_err(|e| Error::Platform(format!("Error sending follow-up message: {e}")))?;
    }

    Ok(())
}
