use crate::{
    error::Result,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, TrackRef,
    },
};

use super::SpotifyApi;

impl SpotifyApi {
    /// Creates an empty playlist owned by `user_id`.
    ///
    /// Nothing checks for an existing playlist of the same name, so calling
    /// this twice yields two playlists.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        let res = self
            .http
            .post(self.url(&format!("/users/{user_id}/playlists")))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<CreatePlaylistResponse>()
            .await?;

        Ok(res)
    }

    /// Appends tracks to a playlist in a single request, keeping their order.
    ///
    /// Spotify accepts at most 100 URIs per call.
    pub async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackRef]) -> Result<String> {
        let body = AddTrackToPlaylistRequest {
            uris: tracks.iter().map(TrackRef::uri).collect(),
        };

        let res = self
            .http
            .post(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<AddTrackToPlaylistResponse>()
            .await?;

        Ok(res.snapshot_id)
    }
}
