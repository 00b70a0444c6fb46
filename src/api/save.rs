use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    info,
    management::{PlaylistBuilder, TokenManager},
    server::AppState,
    session,
    spotify::SpotifyApi,
    utils,
};

pub const SUCCESS_MESSAGE: &str = "IT WORKED!";

/// Builds the playlist for the signed-in user.
///
/// Without a usable session the browser is sent back to `/`. A token close
/// to expiry is refreshed and written back to the session before any Web API
/// call, so the updated cookie reaches the browser even when building the
/// playlist fails afterwards.
pub async fn save_ultimate_top_ten(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let token = match session::load(&jar) {
        Ok(token) => token,
        Err(err) => return (jar, err).into_response(),
    };

    let mut manager = TokenManager::new(token);
    if let Err(err) = manager.ensure_fresh(&state.auth, utils::now()).await {
        return (session::clear(jar), err).into_response();
    }

    let jar = if manager.was_refreshed() {
        info!("Access token refreshed");
        session::store(jar, manager.current_token())
    } else {
        jar
    };

    let api = SpotifyApi::new(
        state.http.clone(),
        state.config.api_url.clone(),
        manager.into_token().access_token,
    );

    match PlaylistBuilder::new(&api).build().await {
        Ok(_) => (jar, SUCCESS_MESSAGE).into_response(),
        Err(err) => (jar, err).into_response(),
    }
}
