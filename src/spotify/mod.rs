//! # Spotify Integration Module
//!
//! This module is the integration layer between the service and Spotify. It
//! covers the two remote systems the service talks to:
//!
//! ```text
//! Request handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authorization (OAuth 2.0 Authorization Code Flow)
//!     ├── User Operations (profile, top tracks)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts Service / Spotify Web API
//! ```
//!
//! ## Authorization
//!
//! [`auth::AuthClient`] builds the consent page URL and talks to the token
//! endpoint. The client secret is sent with HTTP Basic authentication and
//! never leaves the server.
//!
//! ## Web API
//!
//! [`SpotifyApi`] is a thin, token-scoped client for the Web API. The
//! endpoints it covers are:
//!
//! - `GET /me` - profile of the signed-in user
//! - `GET /me/top/tracks` - the user's most played tracks
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks to a playlist
//!
//! Every non-success status is turned into an error with
//! [`reqwest::Response::error_for_status`]; there is no retry and no rate
//! limit handling.

pub mod auth;
pub mod playlist;
pub mod user;

use reqwest::Client;

/// Web API client bound to a single access token.
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyApi {
    pub fn new(http: Client, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
