use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use reqwest::Client;

use crate::{Res, api, config::Config, info, spotify::auth::AuthClient, utils};

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub auth: AuthClient,
    key: Key,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let auth = AuthClient::new(http.clone(), &config);
        let key = utils::session_key(&config.session_secret);

        Self {
            config: Arc::new(config),
            http,
            auth,
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::login))
        .route("/redirect", get(api::redirect))
        .route(api::SAVE_PATH, get(api::save_ultimate_top_ten))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Binds the configured address and serves requests until the process ends.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.server_addr;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
