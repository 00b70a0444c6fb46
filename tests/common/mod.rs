#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::{Client, header::SET_COOKIE, redirect::Policy};
use serde_json::{Value, json};
use ultimate_top_ten::{
    config::Config,
    server::{self, AppState},
};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const GOOD_CODE: &str = "good-code";
pub const FIRST_ACCESS: &str = "access-1";
pub const FIRST_REFRESH: &str = "refresh-1";
pub const REFRESHED_ACCESS: &str = "refreshed-access";
pub const GRANTED_SCOPE: &str = "user-top-read playlist-modify-public user-read-private";

/// One request received by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Value,
}

impl Recorded {
    pub fn bearer(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub exchange_expires_in: i64,
    pub track_count: usize,
    pub display_name: Option<String>,
    pub fail_add_tracks: bool,
    pub reject_refresh: bool,
    pub omit_scope: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_expires_in: 3600,
            track_count: 10,
            display_name: Some("Ada".to_string()),
            fail_add_tracks: false,
            reject_refresh: false,
            omit_scope: false,
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    settings: Arc<Mutex<Settings>>,
}

impl MockState {
    fn record(&self, path: String, headers: &HeaderMap, query: HashMap<String, String>, body: Value) {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization,
            query,
            body,
        });
    }

    fn settings(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    fn playlists_created(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path.ends_with("/playlists") && r.path.starts_with("/v1/users/"))
            .count()
    }
}

/// Stand-in for both the Spotify accounts service and the Web API.
pub struct MockSpotify {
    pub base_url: String,
    state: MockState,
}

impl MockSpotify {
    pub async fn spawn() -> Self {
        Self::spawn_with(Settings::default()).await
    }

    pub async fn spawn_with(settings: Settings) -> Self {
        let state = MockState {
            requests: Arc::default(),
            settings: Arc::new(Mutex::new(settings)),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route("/v1/playlists/{playlist_id}/tracks", post(add_tracks))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path_suffix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(path_suffix))
            .collect()
    }

    /// Requests to the add-tracks endpoint of any playlist.
    pub fn add_track_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/v1/playlists/") && r.path.ends_with("/tracks"))
            .collect()
    }

    pub fn token_grants(&self) -> Vec<String> {
        self.requests_to("/api/token")
            .iter()
            .map(|r| r.body["grant_type"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn config(&self) -> Config {
        let vars = HashMap::from([
            ("CLIENT_ID", CLIENT_ID.to_string()),
            ("CLIENT_SECRET", CLIENT_SECRET.to_string()),
            ("SERVER_ADDRESS", "127.0.0.1:0".to_string()),
            ("REDIRECT_URI", "http://127.0.0.1:5000/redirect".to_string()),
            ("SPOTIFY_AUTH_URL", format!("{}/authorize", self.base_url)),
            ("SPOTIFY_TOKEN_URL", format!("{}/api/token", self.base_url)),
            ("SPOTIFY_API_URL", format!("{}/v1", self.base_url)),
        ]);
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }
}

pub fn track_id(i: usize) -> String {
    format!("track{i:02}")
}

async fn token(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.record("/api/token".to_string(), &headers, HashMap::new(), json!(form));

    let expected = ultimate_top_ten::utils::basic_auth_header(CLIENT_ID, CLIENT_SECRET);
    let authorized = headers
        .get(AUTHORIZATION)
        .is_some_and(|v| v.to_str().ok() == Some(expected.as_str()));
    if !authorized {
        return invalid("invalid_client");
    }

    let settings = state.settings();
    let mut grant = match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(GOOD_CODE) => {
            json!({
                "access_token": FIRST_ACCESS,
                "token_type": "Bearer",
                "expires_in": settings.exchange_expires_in,
                "refresh_token": FIRST_REFRESH,
                "scope": GRANTED_SCOPE,
            })
        }
        Some("refresh_token")
            if !settings.reject_refresh
                && form.get("refresh_token").map(String::as_str) == Some(FIRST_REFRESH) =>
        {
            json!({
                "access_token": REFRESHED_ACCESS,
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": GRANTED_SCOPE,
            })
        }
        _ => return invalid("invalid_grant"),
    };

    if settings.omit_scope {
        if let Some(fields) = grant.as_object_mut() {
            fields.remove("scope");
        }
    }
    Json(grant).into_response()
}

fn invalid(error: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    let value = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    matches!(
        value.and_then(|v| v.strip_prefix("Bearer ")),
        Some(FIRST_ACCESS) | Some(REFRESHED_ACCESS)
    )
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
    )
        .into_response()
}

async fn me(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("/v1/me".to_string(), &headers, HashMap::new(), Value::Null);
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    Json(json!({
        "id": "ada-user",
        "display_name": state.settings().display_name,
    }))
    .into_response()
}

async fn top_tracks(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/v1/me/top/tracks".to_string(), &headers, query, Value::Null);
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let items: Vec<Value> = (0..state.settings().track_count)
        .map(|i| json!({ "id": track_id(i), "name": format!("Song {i}"), "uri": format!("spotify:track:{}", track_id(i)) }))
        .collect();
    Json(json!({ "items": items, "total": items.len() })).into_response()
}

async fn create_playlist(
    State(state): State<MockState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(
        format!("/v1/users/{user_id}/playlists"),
        &headers,
        HashMap::new(),
        body.clone(),
    );
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let n = state.playlists_created();
    (
        StatusCode::CREATED,
        Json(json!({
            "id": format!("playlist-{n}"),
            "name": body["name"],
            "description": body["description"],
            "public": body["public"],
            "collaborative": body["collaborative"],
        })),
    )
        .into_response()
}

async fn add_tracks(
    State(state): State<MockState>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(
        format!("/v1/playlists/{playlist_id}/tracks"),
        &headers,
        HashMap::new(),
        body,
    );
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if state.settings().fail_add_tracks {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))).into_response()
}

/// The service under test, served on an ephemeral port.
pub struct TestApp {
    pub url: String,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(mock: &MockSpotify) -> Self {
        Self::spawn_with_config(mock.config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        let app = server::router(AppState::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder().redirect(Policy::none()).build().unwrap();
        Self {
            url: format!("http://{addr}"),
            client,
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(format!("{}{}", self.url, path));
        if let Some(cookie) = cookie {
            req = req.header(reqwest::header::COOKIE, cookie);
        }
        req.send().await.unwrap()
    }

    /// Runs the OAuth callback with a valid code and returns the session
    /// cookie it sets.
    pub async fn sign_in(&self) -> String {
        let resp = self
            .get(&format!("/redirect?code={GOOD_CODE}"), None)
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::FOUND);
        session_cookie(&resp).expect("redirect should set a session cookie")
    }
}

/// `name=value` pair of a non-empty session cookie set by the response.
pub fn session_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| {
            pair.strip_prefix("spotify_session=")
                .is_some_and(|value| !value.is_empty())
        })
        .map(str::to_string)
}

pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
