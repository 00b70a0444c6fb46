use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{api::found, warning};

/// Failures that can occur while serving a request.
///
/// Only the session-related variants are recovered from, by sending the
/// browser back to the login route. Everything else surfaces as a generic
/// server error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("authorization failed: {0}")]
    Auth(String),
    #[error("no token found in session")]
    SessionMissing,
    #[error("remote API request failed: {0}")]
    RemoteApi(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(reason) => {
                warning!("Authorization failed, redirecting to login: {}", reason);
                found("/")
            }
            AppError::SessionMissing => {
                warning!("User not logged in, redirecting to login");
                found("/")
            }
            AppError::RemoteApi(e) => {
                warning!("Spotify API request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
