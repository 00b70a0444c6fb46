use axum::{extract::State, response::Response};

use crate::{info, server::AppState};

use super::found;

/// Sends the browser to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Response {
    let url = state.auth.build_authorize_url();
    info!("Redirecting to Spotify authorization");
    found(url.as_str())
}
