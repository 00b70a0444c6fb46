use crate::{
    error::Result,
    spotify::auth::AuthClient,
    types::{Freshness, TokenRecord},
};

/// Seconds before expiry at which a token is no longer used as-is.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Decides whether a token can be used at `now` or has to be refreshed first.
pub fn freshness(token: &TokenRecord, now: i64) -> Freshness {
    if token.expires_at - now < REFRESH_MARGIN_SECS {
        Freshness::NeedsRefresh
    } else {
        Freshness::Valid
    }
}

/// Keeps the token of one session usable.
pub struct TokenManager {
    token: TokenRecord,
    refreshed: bool,
}

impl TokenManager {
    pub fn new(token: TokenRecord) -> Self {
        TokenManager {
            token,
            refreshed: false,
        }
    }

    /// Refreshes the token when it is about to expire.
    ///
    /// The refreshed record replaces the old one; callers should persist it
    /// whenever [`TokenManager::was_refreshed`] reports a change. The granted
    /// scope carries over when the token endpoint does not restate it.
    pub async fn ensure_fresh(&mut self, auth: &AuthClient, now: i64) -> Result<&TokenRecord> {
        if freshness(&self.token, now) == Freshness::NeedsRefresh {
            let mut refreshed = auth.refresh(&self.token.refresh_token).await?;
            if refreshed.scope.is_empty() {
                refreshed.scope = std::mem::take(&mut self.token.scope);
            }
            self.token = refreshed;
            self.refreshed = true;
        }

        Ok(&self.token)
    }

    pub fn was_refreshed(&self) -> bool {
        self.refreshed
    }

    pub fn current_token(&self) -> &TokenRecord {
        &self.token
    }

    pub fn into_token(self) -> TokenRecord {
        self.token
    }
}
