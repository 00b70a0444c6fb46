use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{
    config::{Config, SPOTIFY_SCOPE},
    error::{AppError, Result},
    types::{TokenRecord, TokenResponse},
    utils,
};

/// Client for Spotify's OAuth 2.0 authorization server.
///
/// Holds the application credentials and the redirect target. Cloning is
/// cheap; the underlying [`Client`] shares its connection pool.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
}

impl AuthClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// Builds the URL of Spotify's consent page.
    ///
    /// The URL depends only on the configured credentials, redirect URI and
    /// the fixed scope, so the same configuration always yields the same URL.
    ///
    /// # Example
    ///
    /// ```
    /// let url = auth.build_authorize_url();
    /// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
    /// ```
    pub fn build_authorize_url(&self) -> Url {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SPOTIFY_SCOPE);
        url
    }

    /// Exchanges an authorization code for a token record.
    ///
    /// Completes the Authorization Code Flow by trading the one-time code
    /// received on the redirect route for an access/refresh token pair. The
    /// code is single-use and expires quickly, so this has to happen right
    /// after the redirect.
    ///
    /// # Errors
    ///
    /// Any rejection by the token endpoint, transport failure or malformed
    /// response is reported as [`AppError::Auth`]. A response without a
    /// refresh token is rejected as well, since the session could never be
    /// renewed.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenRecord> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        let now = utils::now();
        let Some(refresh_token) = response.refresh_token else {
            return Err(AppError::Auth(
                "token response did not include a refresh token".to_string(),
            ));
        };

        // Without a scope field the grant covers everything requested.
        Ok(TokenRecord {
            access_token: response.access_token,
            refresh_token,
            expires_at: now.saturating_add(response.expires_in),
            scope: utils::parse_scope(response.scope.as_deref().unwrap_or(SPOTIFY_SCOPE)),
        })
    }

    /// Obtains a new access token with a refresh token.
    ///
    /// Spotify may or may not rotate the refresh token. When the response
    /// carries none, the one passed in stays valid and is kept. A response
    /// without a scope yields an empty set; [`crate::management::TokenManager`]
    /// then keeps the scope of the record being replaced.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenRecord> {
        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        let now = utils::now();
        Ok(TokenRecord {
            access_token: response.access_token,
            refresh_token: response
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            expires_at: now.saturating_add(response.expires_in),
            scope: utils::parse_scope(response.scope.as_deref().unwrap_or_default()),
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let res = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        res.json::<TokenResponse>()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))
    }
}
