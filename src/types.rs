use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Name of the synthetic playlist holding the user's liked songs.
pub const LIKED_SONGS_PLAYLIST: &str = "Spotify Liked Songs";

/// Artist credit of a [`Track`]. Only the name is carried over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// A track as carried from Spotify to TIDAL. Only name and artists survive;
/// the Spotify id is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "track_name")]
    pub name: String,
    #[serde(rename = "artist_name")]
    pub artists: Vec<ArtistRef>,
}

impl Track {
    pub fn new(name: &str, artists: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| ArtistRef {
                    name: a.to_string(),
                })
                .collect(),
        }
    }

    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|a| a.name.as_str()).collect()
    }
}

/// A named, ordered list of tracks. Serialized as one entry of the library
/// document: `{"playlist_name": ..., "tracks": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "playlist_name")]
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Result of looking a track up on TIDAL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched { destination_track_id: String },
    NotFound,
}

/// Lifecycle of a destination playlist during a run:
/// `Created -> Populating -> Completed | Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistState {
    Created,
    Populating,
    Completed,
    Aborted,
}

/// What happened to one playlist on the destination side.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub playlist_name: String,
    pub destination_playlist_id: String,
    pub inserted_count: usize,
    /// Tracks without a match, with the name of the playlist they came from.
    pub unmatched: Vec<(Track, String)>,
    pub state: PlaylistState,
}

/// Where and why a run stopped.
#[derive(Debug, Clone)]
pub struct AbortReason {
    pub playlist_name: String,
    pub track_name: String,
    pub message: String,
}

/// Totals over a whole import run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub playlists_processed: usize,
    pub tracks_inserted: usize,
    pub tracks_not_found: usize,
    pub report_path: Option<std::path::PathBuf>,
    pub failed_playlists: Vec<String>,
    pub aborted: Option<AbortReason>,
}

impl RunSummary {
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

// Spotify Web API payloads

/// One page of a `limit`/`offset` paginated Spotify listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// Item of `/me/playlists`: just enough to fetch the tracks later.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistStub {
    pub id: String,
    pub name: String,
}

/// Item of `/playlists/{id}/tracks` and `/me/tracks`. `track` is null for
/// tracks that are no longer available.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            name: track.name,
            artists: track.artists,
        }
    }
}

/// Row of the playlist list shown before selection. `index` is what
/// `--include`/`--exclude` refer to.
#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub index: usize,
    pub name: String,
}

// TIDAL OpenAPI payloads (JSON:API)

#[derive(Debug, Clone, Deserialize)]
pub struct TidalToken {
    pub access_token: String,
}

/// JSON:API resource identifier, `{"id": ..., "type": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Top level JSON:API request document.
#[derive(Debug, Clone, Serialize)]
pub struct Document<T> {
    pub data: T,
}

/// `data` member of the create-playlist request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistData {
    pub attributes: CreatePlaylistAttributes,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistAttributes {
    pub access_type: String,
    pub description: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPlaylistResponse {
    pub data: ResourceIdentifier,
}

/// Body of `GET /searchResults/{query}?include=tracks`.
///
/// Every level down to `data.relationships.tracks.data` is required, so a
/// document that lacks any of them fails to deserialize. Only an empty
/// `tracks.data` array means the search found nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultsResponse {
    pub data: SearchResultsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultsData {
    pub relationships: SearchRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRelationships {
    pub tracks: Relationship,
}

/// A JSON:API to-many relationship, in TIDAL's ranking order.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub data: Vec<ResourceIdentifier>,
}

impl SearchResultsResponse {
    /// First track id under `data.relationships.tracks.data`.
    pub fn first_track_id(&self) -> Option<&str> {
        self.data
            .relationships
            .tracks
            .data
            .first()
            .map(|t| t.id.as_str())
    }
}
