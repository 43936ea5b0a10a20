// File: streambot-core/src/platforms/twitch/client.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use twitch_oauth2::{AccessToken, ClientId, ClientSecret};

use crate::Error;
use crate::platforms::StreamingApi;
use crate::platforms::twitch::requests::{stream, token};
use streambot_common::models::LiveStream;

pub const HELIX_BASE_URL: &str = "https://api.twitch.tv/helix";
pub const OAUTH_BASE_URL: &str = "https://id.twitch.tv/oauth2";

/// A small wrapper client for the Helix and OAuth endpoints the poller uses.
///
/// The base URLs are overridable so tests can point the client at a local fake.
pub struct TwitchHelixClient {
    http: Arc<ReqwestClient>,
    client_id: ClientId,
    client_secret: ClientSecret,
    helix_base_url: String,
    oauth_base_url: String,
}

impl TwitchHelixClient {
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self, Error> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http: Arc::new(http),
            client_id: ClientId::new(client_id.to_string()),
            client_secret: ClientSecret::new(client_secret.to_string()),
            helix_base_url: HELIX_BASE_URL.to_string(),
            oauth_base_url: OAUTH_BASE_URL.to_string(),
        })
    }

    pub fn with_base_urls(mut self, helix_base_url: &str, oauth_base_url: &str) -> Self {
        self.helix_base_url = helix_base_url.trim_end_matches('/').to_string();
        self.oauth_base_url = oauth_base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.secret()
    }

    pub fn helix_base_url(&self) -> &str {
        &self.helix_base_url
    }

    pub fn oauth_base_url(&self) -> &str {
        &self.oauth_base_url
    }

    pub fn http_client(&self) -> Arc<ReqwestClient> {
        self.http.clone()
    }
}

#[async_trait]
impl StreamingApi for TwitchHelixClient {
    async fn fetch_app_token(&self) -> Result<AccessToken, Error> {
        token::fetch_app_access_token(self).await
    }

    async fn get_live_streams(
        &self,
        token: &AccessToken,
        logins: &[String],
    ) -> Result<Vec<LiveStream>, Error> {
        stream::fetch_live_streams(self, token, logins).await
    }
}
