// File: streambot-core/src/services/discord/slashcommands/add_streamer.rs

use tracing::error;
use twilight_model::{application::command::CommandType, guild::Permissions};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use crate::services::discord::slashcommands::{CommandReply, STREAMER_NAME_OPTION};
use streambot_common::traits::repository_traits::StreamerRepository;

pub const COMMAND_NAME: &str = "addstreamer";

pub fn create_add_streamer_command() -> CommandBuilder {
    CommandBuilder::new(COMMAND_NAME, "Add a streamer to tracking", CommandType::ChatInput)
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .option(StringBuilder::new(STREAMER_NAME_OPTION, "Twitch login of the streamer").required(true))
}

pub async fn run_add_streamer(repo: &dyn StreamerRepository, streamer_name: &str) -> CommandReply {
    match repo.add_streamer(streamer_name).await {
        Ok(_) => CommandReply::private(format!("Added {streamer_name} to the list.")),
        Err(Error::AlreadyTracked(_)) => {
            CommandReply::private(format!("{streamer_name} is already being tracked."))
        }
        Err(Error::Parse(_)) => CommandReply::private("Please give a streamer name."),
        Err(e) => {
            error!("Adding '{}' failed: {}", streamer_name, e);
            CommandReply::private(format!("Could not add {streamer_name}: {e}"))
        }
    }
}
