//! Cookie-backed storage for the token record of one browser session.
//!
//! The record lives in a single signed cookie. Its value is the URL-safe
//! base64 encoding of a JSON object holding the record under the
//! `token_info` key. A cookie with a bad signature, bad encoding or no record
//! is treated as no session at all.

use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{
    error::{AppError, Result},
    types::{SessionData, TokenRecord},
};

pub const SESSION_COOKIE: &str = "spotify_session";

/// Reads the token record from the session.
///
/// # Errors
///
/// Returns [`AppError::SessionMissing`] when there is no cookie or its
/// contents cannot be decoded.
pub fn load(jar: &SignedCookieJar) -> Result<TokenRecord> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(AppError::SessionMissing)?;
    decode(cookie.value())
        .and_then(|data| data.token_info)
        .ok_or(AppError::SessionMissing)
}

/// Stores the token record, replacing whatever the session held before.
pub fn store(jar: SignedCookieJar, token: &TokenRecord) -> SignedCookieJar {
    let data = SessionData {
        token_info: Some(token.clone()),
    };

    jar.add(
        Cookie::build((SESSION_COOKIE, encode(&data)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Removes the session cookie.
pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

fn encode(data: &SessionData) -> String {
    // Serializing plain strings and integers cannot fail.
    let json = serde_json::to_vec(data).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Option<SessionData> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}
