use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{error::AppError, server::AppState, session, success};

use super::{SAVE_PATH, found};

/// OAuth callback. Trades the authorization code for a token record and
/// stores it in a fresh session.
///
/// Any previous session is dropped first, so a failed exchange leaves the
/// browser signed out and back on the login route.
pub async fn redirect(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    jar: SignedCookieJar,
) -> Response {
    let jar = session::clear(jar);

    if let Some(reason) = params.get("error") {
        let err = AppError::Auth(format!("user denied authorization: {reason}"));
        return (jar, err).into_response();
    }

    let Some(code) = params.get("code") else {
        let err = AppError::Auth("missing authorization code".to_string());
        return (jar, err).into_response();
    };

    match state.auth.exchange_code(code).await {
        Ok(token) => {
            success!("Authorization code exchanged");
            (session::store(jar, &token), found(SAVE_PATH)).into_response()
        }
        Err(err) => (jar, err).into_response(),
    }
}
