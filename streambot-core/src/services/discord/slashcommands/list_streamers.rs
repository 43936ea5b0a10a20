// File: streambot-core/src/services/discord/slashcommands/list_streamers.rs

use tracing::error;
use twilight_model::application::command::CommandType;
use twilight_util::builder::command::CommandBuilder;

use crate::Error;
use crate::services::discord::slashcommands::CommandReply;
use streambot_common::traits::repository_traits::StreamerRepository;

pub const COMMAND_NAME: &str = "liststreamers";

/// Discord rejects message content longer than this.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;
/// Chunk size used once the list no longer fits in one message.
pub const LIST_CHUNK_SIZE: usize = 1990;

pub const EMPTY_LIST_MESSAGE: &str = "No streamers are currently being tracked.";

pub fn create_list_streamers_command() -> CommandBuilder {
    CommandBuilder::new(COMMAND_NAME, "List all tracked streamers", CommandType::ChatInput)
}

pub async fn run_list_streamers(repo: &dyn StreamerRepository) -> CommandReply {
    match repo.list_streamers().await {
        Ok(streamers) => CommandReply::private_chunks(render_streamer_list(&streamers)),
        Err(Error::Empty) => CommandReply::private(EMPTY_LIST_MESSAGE),
        Err(e) => {
            error!("Listing streamers failed: {}", e);
            CommandReply::private("Could not read the streamer list.")
        }
    }
}

/// Renders the list under a header and splits it into messages that each fit
/// under the Discord limit. Concatenating the result gives back the full text.
pub fn render_streamer_list(streamers: &[String]) -> Vec<String> {
    let text = format!("Streamers:\n{}", streamers.join("\n"));
    if text.chars().count() <= DISCORD_MESSAGE_LIMIT {
        return vec![text];
    }
    chunk_message(&text, LIST_CHUNK_SIZE)
}

/// Splits on character (not byte) boundaries every `max_chars` characters.
pub fn chunk_message(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
