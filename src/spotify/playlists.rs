use crate::{
    config::SpotifySettings,
    error::Result,
    http::{RateLimitedClient, RetryPolicy},
    info,
    spotify::{auth::PROVIDER, pagination::Paginator},
    types::{LIKED_SONGS_PLAYLIST, Playlist, PlaylistStub, SpotifyUser, Track, TrackEntry},
};

/// Read-only access to the signed-in user's Spotify library.
pub struct SpotifyClient {
    http: RateLimitedClient,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    /// Creates a client with the Spotify retry policy.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the Web API, trailing slash optional
    /// * `token` - Access token from [`crate::spotify::auth::exchange_code`]
    pub fn new(api_url: &str, token: String) -> Result<Self> {
        Self::with_policy(api_url, token, RetryPolicy::spotify())
    }

    pub fn with_policy(api_url: &str, token: String, policy: RetryPolicy) -> Result<Self> {
        Ok(Self {
            http: RateLimitedClient::new(PROVIDER, policy)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_settings(settings: &SpotifySettings, token: String) -> Result<Self> {
        Self::new(&settings.api_url, token)
    }

    /// Profile of the signed-in user (`GET /me`).
    pub async fn current_user(&self) -> Result<SpotifyUser> {
        let url = format!("{}/me", self.api_url);
        let response = self
            .http
            .send(|client| client.get(&url).bearer_auth(&self.token))
            .await?;
        Ok(response.json::<SpotifyUser>().await?)
    }

    /// Playlists owned or followed by the user (`GET /me/playlists`).
    pub fn playlists(&self) -> Paginator<'_, PlaylistStub> {
        Paginator::new(
            &self.http,
            &self.token,
            format!("{}/me/playlists", self.api_url),
            "playlists",
        )
    }

    /// Raw entries of one playlist (`GET /playlists/{id}/tracks`).
    pub fn playlist_tracks(&self, playlist_id: &str) -> Paginator<'_, TrackEntry> {
        Paginator::new(
            &self.http,
            &self.token,
            format!("{}/playlists/{}/tracks", self.api_url, playlist_id),
            &format!("tracks in playlist {}", playlist_id),
        )
    }

    /// Raw entries of the liked songs (`GET /me/tracks`).
    pub fn saved_tracks(&self) -> Paginator<'_, TrackEntry> {
        Paginator::new(
            &self.http,
            &self.token,
            format!("{}/me/tracks", self.api_url),
            "user saved tracks",
        )
    }

    /// Fetches and normalizes the tracks of one playlist.
    pub async fn fetch_playlist(&self, stub: &PlaylistStub) -> Playlist {
        let entries = self.playlist_tracks(&stub.id).collect_all().await;
        let tracks = normalize_entries(entries);
        info!(
            "Received tracks from playlist {}: {} tracks",
            stub.name,
            tracks.len()
        );
        Playlist {
            name: stub.name.clone(),
            tracks,
        }
    }

    /// Liked songs as a synthetic playlist, `None` when there are none.
    pub async fn fetch_liked_songs(&self) -> Option<Playlist> {
        let tracks = normalize_entries(self.saved_tracks().collect_all().await);
        if tracks.is_empty() {
            return None;
        }
        info!("Received user's saved tracks: {} tracks", tracks.len());
        Some(Playlist {
            name: LIKED_SONGS_PLAYLIST.to_string(),
            tracks,
        })
    }

    /// Reads the selected playlists in order, followed by the liked songs.
    ///
    /// # Arguments
    ///
    /// * `stubs` - Playlists to read, in the order they should be migrated
    /// * `include_liked` - Whether to append the liked songs as
    ///   [`LIKED_SONGS_PLAYLIST`]
    ///
    /// # Returns
    ///
    /// One [`Playlist`] per stub. The liked songs come last and only when
    /// there are any. A listing that fails midway contributes the tracks read
    /// before the failure.
    pub async fn read_library(&self, stubs: &[PlaylistStub], include_liked: bool) -> Vec<Playlist> {
        let mut playlists = Vec::with_capacity(stubs.len() + 1);
        for stub in stubs {
            playlists.push(self.fetch_playlist(stub).await);
        }
        if include_liked {
            if let Some(liked) = self.fetch_liked_songs().await {
                playlists.push(liked);
            }
        }
        playlists
    }
}

/// Drops entries whose track is gone and projects the rest to [`Track`].
pub fn normalize_entries(entries: Vec<TrackEntry>) -> Vec<Track> {
    entries
        .into_iter()
        .filter_map(|entry| entry.track)
        .map(Track::from)
        .collect()
}
