use crate::{
    error::Result,
    info,
    spotify::SpotifyApi,
    success,
    types::{CreatePlaylistRequest, CreatePlaylistResponse, PlaylistRequest, TrackRef},
    utils,
};

/// Number of tracks that make up the playlist.
pub const TOP_TRACK_LIMIT: u32 = 10;

/// Builds the "Ultimate Top Ten" playlist for the owner of an access token.
pub struct PlaylistBuilder<'a> {
    api: &'a SpotifyApi,
}

impl<'a> PlaylistBuilder<'a> {
    pub fn new(api: &'a SpotifyApi) -> Self {
        Self { api }
    }

    /// Reads the user's profile and all-time top tracks, then creates the
    /// playlist and fills it.
    ///
    /// The steps run strictly in order: profile, top tracks, playlist
    /// creation, track addition. A failure after the playlist was created
    /// leaves the empty playlist behind.
    pub async fn build(&self) -> Result<CreatePlaylistResponse> {
        let request = self.prepare().await?;
        self.submit(request).await
    }

    /// Collects everything needed for the playlist without modifying
    /// anything on the user's account.
    pub async fn prepare(&self) -> Result<PlaylistRequest> {
        let profile = self.api.current_user().await?;
        let tracks = self.api.top_tracks(TOP_TRACK_LIMIT).await?;

        let display_name = profile.name();
        Ok(PlaylistRequest {
            owner_id: profile.id.clone(),
            name: utils::playlist_name(display_name),
            description: utils::playlist_description(display_name),
            public: true,
            tracks: tracks.into_iter().map(|t| TrackRef(t.id)).collect(),
        })
    }

    /// Creates the playlist and adds the tracks with one request each.
    pub async fn submit(&self, request: PlaylistRequest) -> Result<CreatePlaylistResponse> {
        let playlist = self
            .api
            .create_playlist(
                &request.owner_id,
                &CreatePlaylistRequest {
                    name: request.name,
                    description: request.description,
                    public: request.public,
                    collaborative: false,
                },
            )
            .await?;
        info!("Created playlist {} ({})", playlist.name, playlist.id);

        // Spotify rejects an empty uris list.
        if !request.tracks.is_empty() {
            self.api.add_tracks(&playlist.id, &request.tracks).await?;
        }

        success!(
            "Added {} tracks to playlist {}",
            request.tracks.len(),
            playlist.name
        );
        Ok(playlist)
    }
}
