// App access token via the client-credentials grant.
//
// The poller holds the token in memory and only calls this when it has none,
// or right after Helix answered 401.

use serde::Deserialize;
use tracing::debug;
use twitch_oauth2::AccessToken;

use crate::Error;
use crate::platforms::twitch::client::TwitchHelixClient;

/// Matches Twitch's JSON from the token endpoint
#[derive(Debug, Deserialize)]
struct AppTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
}

pub async fn fetch_app_access_token(client: &TwitchHelixClient) -> Result<AccessToken, Error> {
    let token_url = format!("{}/token", client.oauth_base_url());
    let params = [
        ("client_id", client.client_id()),
        ("client_secret", client.client_secret()),
        ("grant_type", "client_credentials"),
    ];

    let resp = client
        .http_client()
        .post(&token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| Error::CredentialUnavailable(format!("HTTP error requesting app token: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();
        return Err(Error::CredentialUnavailable(format!(
            "Twitch token endpoint: HTTP {} => {}",
            status, body_text
        )));
    }

    let body = resp
        .json::<AppTokenResponse>()
        .await
        .map_err(|e| Error::CredentialUnavailable(format!("Parse error on token JSON: {e}")))?;

    debug!(
        "Obtained Twitch app token (type={:?}, expires_in={:?}s)",
        body.token_type, body.expires_in
    );
    Ok(AccessToken::new(body.access_token))
}
