// File: streambot-core/src/services/discord/slashcommands/remove_streamer.rs

use tracing::error;
use twilight_model::{application::command::CommandType, guild::Permissions};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use crate::services::discord::slashcommands::{CommandReply, STREAMER_NAME_OPTION};
use streambot_common::traits::repository_traits::StreamerRepository;

pub const COMMAND_NAME: &str = "removestreamer";

pub fn create_remove_streamer_command() -> CommandBuilder {
    CommandBuilder::new(COMMAND_NAME, "Remove a streamer from tracking", CommandType::ChatInput)
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .option(StringBuilder::new(STREAMER_NAME_OPTION, "Twitch login of the streamer").required(true))
}

pub async fn run_remove_streamer(repo: &dyn StreamerRepository, streamer_name: &str) -> CommandReply {
    match repo.remove_streamer(streamer_name).await {
        Ok(_) => CommandReply::private(format!("Removed {streamer_name} from the list.")),
        Err(Error::NotTracked(_)) => {
            CommandReply::private(format!("{streamer_name} is not being tracked."))
        }
        Err(e) => {
            error!("Removing '{}' failed: {}", streamer_name, e);
            CommandReply::private(format!("Could not remove {streamer_name}: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::JsonStreamerRepository;

    #[tokio::test]
    async fn remove_is_case_insensitive_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonStreamerRepository::load(dir.path().join("streamers.json")).await.unwrap();
        repo.add_streamer("someone").await.unwrap();

        let reply = run_remove_streamer(&repo, "SomeOne").await;
        assert_eq!(reply, CommandReply::private("Removed SomeOne from the list."));

        let reply = run_remove_streamer(&repo, "someone").await;
        assert_eq!(reply, CommandReply::private("someone is not being tracked."));
    }
}
