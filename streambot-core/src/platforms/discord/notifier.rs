use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use twilight_http::Client as HttpClient;
use twilight_model::channel::message::{AllowedMentions, MentionType};
use twilight_model::channel::message::Embed;
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;
use twilight_model::util::Timestamp;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, ImageSource};

use crate::Error;
use crate::platforms::LiveNotifier;
use streambot_common::models::LiveAnnouncement;

/// Posts live announcements into one fixed text channel, pinging `@everyone`.
pub struct DiscordLiveNotifier {
    http: Arc<HttpClient>,
    channel_id: Id<ChannelMarker>,
}

impl DiscordLiveNotifier {
    pub fn new(http: Arc<HttpClient>, channel_id: Id<ChannelMarker>) -> Self {
        Self { http, channel_id }
    }
}

pub fn build_live_embed(announcement: &LiveAnnouncement) -> Result<Embed, Error> {
    let mut builder = EmbedBuilder::new()
        .title(announcement.title.clone())
        .url(announcement.url.clone())
        .color(announcement.color);

    if let Some(description) = &announcement.description {
        builder = builder.description(description.clone());
    }

    match ImageSource::url(announcement.thumbnail_url.clone()) {
        Ok(source) => builder = builder.thumbnail(source),
        Err(e) => warn!("Leaving out thumbnail '{}': {}", announcement.thumbnail_url, e),
    }

    if let Some(game) = &announcement.game {
        builder = builder.field(EmbedFieldBuilder::new("Playing", game.clone()).inline());
    }

    if let Some(started) = announcement.started_at {
        if let Ok(ts) = Timestamp::from_secs(started.timestamp()) {
            builder = builder.timestamp(ts);
        }
    }

    let embed = builder
        .validate()
        .map_err(|e| Error::Platform(format!("Invalid live embed: {e}")))?
        .build();
    Ok(embed)
}

#[async_trait]
impl LiveNotifier for DiscordLiveNotifier {
    async fn announce(&self, announcement: &LiveAnnouncement) -> Result<(), Error> {
        let embed = build_live_embed(announcement)?;
        let mentions = AllowedMentions {
            parse: vec![MentionType::Everyone],
            ..Default::default()
        };

        self.http
            .create_message(self.channel_id)
            .content(&announcement.content)
            .allowed_mentions(Some(&mentions))
            .embeds(&[embed])
            .await
            .map_err(|e| Error::Platform(format!("Error sending live announcement: {e:?}")))?;

        debug!("Posted '{}' to channel {}", announcement.title, self.channel_id);
        Ok(())
    }
}
