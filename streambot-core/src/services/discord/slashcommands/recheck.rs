// File: streambot-core/src/services/discord/slashcommands/recheck.rs

use std::sync::Arc;

use twilight_http::Client as HttpClient;
use twilight_model::{
    application::{command::CommandType, interaction::Interaction},
    channel::message::MessageFlags,
    guild::Permissions,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
};
use twilight_util::builder::command::CommandBuilder;

use crate::Error;
use crate::services::discord::slashcommands::SlashCommandContext;
use crate::services::live_poll_service::{CycleOutcome, CycleReport};

pub const COMMAND_NAME: &str = "recheck";

pub fn create_recheck_command() -> CommandBuilder {
    CommandBuilder::new(COMMAND_NAME, "Manually recheck streamers", CommandType::ChatInput)
        .default_member_permissions(Permissions::MANAGE_GUILD)
}

/// Defers (ephemeral) first: a cycle may queue behind the timer's cycle and
/// easily outlive Discord's three second response window.
pub async fn handle_recheck_interaction(
    http: &Arc<HttpClient>,
    interaction: &Interaction,
    ctx: &SlashCommandContext,
) -> Result<(), Error> {
    let client = http.interaction(interaction.application_id);

    client
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::DeferredChannelMessageWithSource,
                data: Some(InteractionResponseData {
                    flags: Some(MessageFlags::EPHEMERAL),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error deferring `/recheck`: {e}")))?;

    let report = ctx.live_poll.run_cycle().await;
    let text = recheck_summary(&report);

    client
        .update_response(&interaction.token)
        .content(Some(text.as_str()))
        .await
        .map_err(|e| Error::Platform(format!("Error completing `/recheck`: {e}")))?;

    Ok(())
}

pub fn recheck_summary(report: &CycleReport) -> String {
    match report.outcome {
        CycleOutcome::Completed => {
            let mut text = String::from("Manual recheck completed!");
            if !report.announced.is_empty() {
                text.push_str(&format!(" Announced: {}.", report.announced.join(", ")));
            }
            if report.failed_announcements > 0 {
                text.push_str(&format!(
                    " {} announcement(s) could not be posted and will be retried.",
                    report.failed_announcements
                ));
            }
            if report.failed_batches > 0 {
                text.push_str(&format!(
                    " {} of {} Twitch queries failed.",
                    report.failed_batches, report.batches
                ));
            }
            text
        }
        CycleOutcome::NothingTracked => {
            "Manual recheck completed! No streamers are currently being tracked.".to_string()
        }
        CycleOutcome::NoCredential => {
            "Recheck skipped: could not get a Twitch access token.".to_string()
        }
        CycleOutcome::CredentialExpired => {
            "Recheck abandoned: the Twitch token had expired and was renewed. Try again shortly.".to_string()
        }
        CycleOutcome::StoreUnavailable => {
            "Recheck skipped: could not read the streamer list.".to_string()
        }
    }
}
