// tests/helpers/mod.rs
//
// In-process stand-in for the two Twitch endpoints the poller talks to.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

pub const FAKE_CLIENT_ID: &str = "fake-client-id";
pub const FAKE_CLIENT_SECRET: &str = "secret";
pub const FAKE_TOKEN: &str = "good-token";

struct FakeState {
    token_requests: usize,
    stream_requests: usize,
    issued: usize,
    accepted_token: Option<String>,
    /// When set, replaces the "login starts with `live`" rule.
    live_override: Option<HashSet<String>>,
}

#[derive(Clone)]
pub struct FakeTwitch {
    pub base_url: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakeTwitch {
    pub fn token_requests(&self) -> usize {
        self.state.lock().unwrap().token_requests
    }

    pub fn stream_requests(&self) -> usize {
        self.state.lock().unwrap().stream_requests
    }

    /// Invalidates the current token; every streams call answers 401 until a new one is issued.
    pub fn revoke_token(&self) {
        self.state.lock().unwrap().accepted_token = None;
    }

    pub fn set_live(&self, logins: &[&str]) {
        self.state.lock().unwrap().live_override =
            Some(logins.iter().map(|l| l.to_string()).collect());
    }
}

pub async fn spawn_fake_twitch() -> FakeTwitch {
    let state = Arc::new(Mutex::new(FakeState {
        token_requests: 0,
        stream_requests: 0,
        issued: 0,
        accepted_token: Some(FAKE_TOKEN.to_string()),
        live_override: None,
    }));

    let app = Router::new()
        .route("/oauth2/token", post(issue_token))
        .route("/helix/streams", get(get_streams))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake twitch");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake twitch server");
    });

    FakeTwitch {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn issue_token(
    State(state): State<Arc<Mutex<FakeState>>>,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    let mut st = state.lock().unwrap();
    st.token_requests += 1;

    let valid = params.get("client_id").map(String::as_str) == Some(FAKE_CLIENT_ID)
        && params.get("client_secret").map(String::as_str) == Some(FAKE_CLIENT_SECRET)
        && params.get("grant_type").map(String::as_str) == Some("client_credentials");
    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": 400, "message": "invalid client" })),
        )
            .into_response();
    }

    let token = if st.issued == 0 {
        FAKE_TOKEN.to_string()
    } else {
        format!("{FAKE_TOKEN}-{}", st.issued)
    };
    st.issued += 1;
    st.accepted_token = Some(token.clone());

    Json(json!({
        "access_token": token,
        "expires_in": 5011271,
        "token_type": "bearer"
    }))
    .into_response()
}

async fn get_streams(
    State(state): State<Arc<Mutex<FakeState>>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let mut st = state.lock().unwrap();
    st.stream_requests += 1;

    let client_id = headers.get("client-id").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let authorized = client_id == Some(FAKE_CLIENT_ID)
        && bearer.is_some()
        && bearer == st.accepted_token.as_deref();
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized", "status": 401, "message": "Invalid OAuth token" })),
        )
            .into_response();
    }

    let logins: Vec<String> = query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "user_login")
        .map(|(_, value)| value.to_string())
        .collect();

    if logins.iter().any(|l| l == "explode") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let data: Vec<_> = logins
        .iter()
        .filter(|login| match &st.live_override {
            Some(live) => live.contains(login.as_str()),
            None => login.starts_with("live"),
        })
        .map(|login| {
            json!({
                "id": "1",
                "user_id": "2",
                "user_login": login,
                "user_name": login.to_uppercase(),
                "game_id": "3",
                "game_name": "Celeste",
                "type": "live",
                "title": format!("{login} on air"),
                "viewer_count": 7,
                "started_at": "2024-03-10T15:04:21Z",
                "language": "en",
                "thumbnail_url": "https://cdn.example/thumb-{width}x{height}.jpg",
                "tag_ids": [],
                "is_mature": false
            })
        })
        .collect();

    Json(json!({ "data": data, "pagination": {} })).into_response()
}
