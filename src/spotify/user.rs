use crate::{
    error::Result,
    types::{TopTracksResponse, Track, UserProfile},
};

use super::SpotifyApi;

/// `time_range` value covering several years of listening history.
pub const ALL_TIME: &str = "long_term";

impl SpotifyApi {
    /// Retrieves the profile of the user the access token belongs to.
    ///
    /// # Errors
    ///
    /// A rejected token shows up as `401 Unauthorized` and is returned as
    /// [`crate::error::AppError::RemoteApi`], like any other failure.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let profile = self
            .http
            .get(self.url("/me"))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<UserProfile>()
            .await?;

        Ok(profile)
    }

    /// Retrieves the user's all-time top tracks, most played first.
    ///
    /// Only the first page is requested; `limit` must be between 1 and 50.
    pub async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        let res = self
            .http
            .get(self.url("/me/top/tracks"))
            .bearer_auth(&self.access_token)
            .query(&[
                ("limit", limit.as_str()),
                ("offset", "0"),
                ("time_range", ALL_TIME),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<TopTracksResponse>()
            .await?;

        Ok(res.items)
    }
}
