//! # API Module
//!
//! HTTP endpoints of the service. Together they implement the redirect-based
//! Authorization Code Flow and the playlist trigger:
//!
//! | Route | Handler | Success | Failure |
//! |---|---|---|---|
//! | `GET /` | [`login`] | 302 to Spotify's consent page | - |
//! | `GET /redirect` | [`redirect`] | 302 to `/saveUltimateTopTen` | 302 to `/` |
//! | `GET /saveUltimateTopTen` | [`save_ultimate_top_ten`] | 200 `IT WORKED!` | 302 to `/`, or 500 |
//! | `GET /health` | [`health`] | 200 JSON status | - |
//!
//! A browser moves through three states: anonymous, awaiting the redirect
//! from Spotify, and authenticated. The only state kept between requests is
//! the signed session cookie managed by [`crate::session`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use ultimate_top_ten::api;
//!
//! let app = Router::new()
//!     .route("/", get(api::login))
//!     .route("/health", get(api::health));
//! ```

mod health;
mod login;
mod redirect;
mod save;

pub use health::health;
pub use login::login;
pub use redirect::redirect;
pub use save::save_ultimate_top_ten;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

pub const SAVE_PATH: &str = "/saveUltimateTopTen";

/// `302 Found` redirect.
///
/// axum's [`axum::response::Redirect`] only offers 303, 307 and 308.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
