// ========================================================
// File: streambot-core/src/platforms/twitch/requests/stream.rs
// ========================================================
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use twitch_oauth2::AccessToken;

use crate::Error;
use crate::platforms::twitch::client::TwitchHelixClient;
use streambot_common::models::LiveStream;

/// Helix accepts at most this many `user_login` values per "Get Streams" call.
pub const HELIX_BATCH_LIMIT: usize = 100;

/// Response from "Get Streams" endpoint.
#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    pub data: Vec<StreamData>,
}

/// Single stream data record. Only the fields the announcement uses are kept.
#[derive(Debug, Deserialize)]
pub struct StreamData {
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl From<StreamData> for LiveStream {
    fn from(s: StreamData) -> Self {
        LiveStream {
            login: s.user_login.to_lowercase(),
            display_name: s.user_name,
            title: s.title,
            thumbnail_url_template: s.thumbnail_url,
            game_name: s.game_name,
            started_at: s.started_at,
        }
    }
}

/// Calls "Get Streams" for one batch of logins and returns the ones currently live.
pub async fn fetch_live_streams(
    client: &TwitchHelixClient,
    token: &AccessToken,
    logins: &[String],
) -> Result<Vec<LiveStream>, Error> {
    if logins.len() > HELIX_BATCH_LIMIT {
        return Err(Error::QueryFailed(format!(
            "{} logins exceeds the Helix limit of {}",
            logins.len(),
            HELIX_BATCH_LIMIT
        )));
    }

    let first = HELIX_BATCH_LIMIT.to_string();
    let mut query: Vec<(&str, &str)> = Vec::with_capacity(logins.len() + 1);
    query.push(("first", first.as_str()));
    for login in logins {
        query.push(("user_login", login.as_str()));
    }

    let streams_url = format!("{}/streams", client.helix_base_url());
    let resp = client
        .http_client()
        .get(&streams_url)
        .header("Client-Id", client.client_id())
        .header("Authorization", format!("Bearer {}", token.secret()))
        .query(&query)
        .send()
        .await
        .map_err(|e| Error::QueryFailed(format!("network error: {e}")))?;

    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        warn!("Helix rejected the app token (401)");
        return Err(Error::CredentialExpired);
    }
    if !status.is_success() {
        let body_text = resp.text().await.unwrap_or_default();
        return Err(Error::QueryFailed(format!("HTTP {} => {}", status, body_text)));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| Error::QueryFailed(format!("reading body: {e}")))?;
    let parsed: StreamsResponse = serde_json::from_str(&body)
        .map_err(|e| Error::QueryFailed(format!("parse error: {e}")))?;

    debug!("Helix reported {} live of {} requested", parsed.data.len(), logins.len());
    Ok(parsed.data.into_iter().map(LiveStream::from).collect())
}
