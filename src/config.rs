//! Configuration management for the Ultimate Top Ten service.
//!
//! Configuration is read once at startup into a [`Config`] value which is then
//! handed to the router. Nothing in the request path reads the environment.
//!
//! Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory (`ultimate-top-ten/.env`)
//! 4. Application defaults for everything except the client credentials

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Permissions requested from the user on the consent page.
pub const SPOTIFY_SCOPE: &str =
    "user-top-read playlist-modify-public playlist-modify-private user-read-private user-read-email";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("invalid server address {0:?}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),
    #[error("invalid URL in {0}: {1}")]
    InvalidUrl(&'static str, String),
}

/// Application configuration shared by every request handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub server_addr: SocketAddr,
    pub redirect_uri: String,
    pub session_secret: String,
    pub auth_url: Url,
    pub token_url: String,
    pub api_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// `CLIENT_ID` and `CLIENT_SECRET` are required. The redirect URI defaults
    /// to the `/redirect` route of the configured server address, and the
    /// session signing secret falls back to the client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an unset credential,
    /// [`ConfigError::InvalidAddress`] when `SERVER_ADDRESS` does not parse and
    /// [`ConfigError::InvalidUrl`] for a malformed authorization URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get("CLIENT_ID").ok_or(ConfigError::Missing("CLIENT_ID"))?;
        let client_secret = get("CLIENT_SECRET").ok_or(ConfigError::Missing("CLIENT_SECRET"))?;

        let raw_addr = get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr = SocketAddr::from_str(&raw_addr)
            .map_err(|e| ConfigError::InvalidAddress(raw_addr.clone(), e))?;

        let redirect_uri =
            get("REDIRECT_URI").unwrap_or_else(|| format!("http://{server_addr}/redirect"));
        let session_secret = get("SESSION_SECRET").unwrap_or_else(|| client_secret.clone());

        let raw_auth_url = get("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
        let auth_url = Url::parse(&raw_auth_url)
            .map_err(|e| ConfigError::InvalidUrl("SPOTIFY_AUTH_URL", e.to_string()))?;

        Ok(Self {
            client_id,
            client_secret,
            server_addr,
            redirect_uri,
            session_secret,
            auth_url,
            token_url: get("SPOTIFY_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    /// Address of the login route, used when opening the browser on startup.
    pub fn login_url(&self) -> String {
        format!("http://{}/", self.server_addr)
    }
}

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/ultimate-top-ten/.env`
/// - macOS: `~/Library/Application Support/ultimate-top-ten/.env`
/// - Windows: `%LOCALAPPDATA%/ultimate-top-ten/.env`
///
/// Variables already present in the environment are never overwritten, and a
/// missing file is not an error. Returns the path of the file that was loaded.
pub fn load_env() -> Option<PathBuf> {
    if let Ok(path) = dotenv::dotenv() {
        return Some(path);
    }

    let path = env_path();
    dotenv::from_path(&path).ok().map(|_| path)
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ultimate-top-ten/.env");
    path
}
