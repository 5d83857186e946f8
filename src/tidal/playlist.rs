use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::sleep;

use crate::{
    error::{MigrationError, Result},
    http::error_body,
    info, success,
    tidal::TidalClient,
    types::{
        CreatePlaylistAttributes, CreatePlaylistData, CreatedPlaylistResponse, Document,
        ResourceIdentifier,
    },
    warning,
};

/// Maximum number of items TIDAL accepts in one add-items request.
pub const MAX_ITEMS_PER_REQUEST: usize = 20;

/// Pause between two add-items requests.
pub const CHUNK_DELAY: Duration = Duration::from_secs(1);

pub const PLAYLIST_DESCRIPTION: &str = "Created with Spotify to TIDAL migration";

impl TidalClient {
    /// Creates a public playlist on TIDAL.
    ///
    /// Sends a JSON:API `playlists` document with `accessType: PUBLIC` and
    /// [`PLAYLIST_DESCRIPTION`].
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the new playlist, taken over from the source
    ///
    /// # Returns
    ///
    /// The id TIDAL assigned to the playlist.
    ///
    /// # Errors
    ///
    /// Anything but 201 Created is a [`MigrationError::Create`] carrying the
    /// status and body. Creation is only ever repeated after a 429.
    pub async fn create_playlist(&self, name: &str) -> Result<String> {
        let url = format!("{}/playlists", self.api_url);
        let body = Document {
            data: CreatePlaylistData {
                attributes: CreatePlaylistAttributes {
                    access_type: "PUBLIC".to_string(),
                    description: PLAYLIST_DESCRIPTION.to_string(),
                    name: name.to_string(),
                },
                kind: "playlists".to_string(),
            },
        };

        let response = self
            .http
            .send(|client| client.post(&url).bearer_auth(&self.token).json(&body))
            .await
            .map_err(|err| match err {
                MigrationError::Http { status, body, .. } => MigrationError::Create {
                    name: name.to_string(),
                    status,
                    body,
                },
                other => other,
            })?;

        if response.status() != StatusCode::CREATED {
            return Err(MigrationError::Create {
                name: name.to_string(),
                status: response.status(),
                body: error_body(response).await,
            });
        }

        let created = response.json::<CreatedPlaylistResponse>().await?;
        success!("Playlist '{}' created successfully.", name);
        Ok(created.data.id)
    }

    /// Appends tracks to a playlist, preserving their order.
    ///
    /// Ids are sent in chunks of at most `chunk_size`, one request at a time,
    /// pausing `delay` between two requests. A chunk answered with anything
    /// but 201 is logged and skipped; the remaining chunks are still sent.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Destination playlist
    /// * `playlist_name` - Name used in log lines
    /// * `track_ids` - TIDAL track ids in insertion order
    /// * `chunk_size` - Maximum ids per request, [`MAX_ITEMS_PER_REQUEST`] in practice
    /// * `delay` - Pause between two requests, [`CHUNK_DELAY`] in practice
    ///
    /// # Returns
    ///
    /// The number of ids in chunks TIDAL accepted.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        playlist_name: &str,
        track_ids: &[String],
        chunk_size: usize,
        delay: Duration,
    ) -> usize {
        info!("Adding {} tracks...", track_ids.len());
        if track_ids.is_empty() {
            info!("No tracks found. 0 tracks were added to {}.", playlist_name);
            return 0;
        }

        let url = format!("{}/playlists/{}/relationships/items", self.api_url, playlist_id);
        let mut inserted = 0;

        for (i, chunk) in track_ids.chunks(chunk_size.max(1)).enumerate() {
            if i > 0 {
                sleep(delay).await;
            }

            let body = Document {
                data: chunk
                    .iter()
                    .map(|id| ResourceIdentifier {
                        id: id.clone(),
                        kind: "tracks".to_string(),
                    })
                    .collect::<Vec<_>>(),
            };

            let result = self
                .http
                .send(|client| client.post(&url).bearer_auth(&self.token).json(&body))
                .await;

            match result {
                Ok(response) if response.status() == StatusCode::CREATED => {
                    inserted += chunk.len();
                    success!("Tracks added to playlist {} successfully.", playlist_name);
                }
                Ok(response) => {
                    let status = response.status();
                    warning!(
                        "Failed to add tracks to playlist {}: {}\n{}",
                        playlist_name,
                        status,
                        error_body(response).await
                    );
                }
                Err(e) => warning!("Failed to add tracks to playlist {}: {}", playlist_name, e),
            }
        }

        inserted
    }
}
