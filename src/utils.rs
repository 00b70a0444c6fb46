use std::collections::BTreeSet;

use axum_extra::extract::cookie::Key;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use sha2::{Digest, Sha512};

/// Current Unix time in seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// `Authorization` header value for HTTP Basic client authentication.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {credentials}")
}

/// Splits a space-separated OAuth scope string into a set.
pub fn parse_scope(scope: &str) -> BTreeSet<String> {
    scope.split_whitespace().map(str::to_string).collect()
}

/// Derives the cookie signing key from an arbitrary-length secret.
///
/// The cookie key needs at least 64 bytes of material, which SHA-512 provides
/// for any input.
pub fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn playlist_name(display_name: &str) -> String {
    format!("{display_name}'s Ultimate Top Ten Songs")
}

pub fn playlist_description(display_name: &str) -> String {
    format!("{display_name} is a music legend. Here's the songs loved most by yours truly.")
}
