use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Credentials for one signed-in browser session.
///
/// `expires_at` is an absolute Unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub scope: BTreeSet<String>,
}

/// Contents of the session cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    pub token_info: Option<TokenRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Valid,
    NeedsRefresh,
}

/// Body of a successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Name shown in the playlist title. Spotify allows accounts without a
    /// display name, in which case the user id is used.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: String,
}

/// Opaque Spotify track identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRef(pub String);

impl TrackRef {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.0)
    }
}

/// Everything needed to create and fill one playlist.
#[derive(Debug, Clone)]
pub struct PlaylistRequest {
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub tracks: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
