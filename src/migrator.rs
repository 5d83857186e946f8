//! Re-creates playlists on TIDAL.
//!
//! For every playlist: create it, search each track in order, collect the
//! matches, append misses to the not-found report, then insert the matches
//! in chunks. A search fault stops the playlist, inserts what was matched
//! before it and aborts the whole run. A failed creation only skips that
//! playlist, and a failed insert chunk is only logged.

use std::time::Duration;

use crate::{
    error::{MigrationError, Result},
    info,
    management::NotFoundReport,
    tidal::{
        TidalClient,
        playlist::{CHUNK_DELAY, MAX_ITEMS_PER_REQUEST},
    },
    types::{AbortReason, MatchResult, MigrationOutcome, Playlist, PlaylistState, RunSummary},
    warning,
};

/// Batching of the add-items requests.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    pub chunk_size: usize,
    pub chunk_delay: Duration,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            chunk_size: MAX_ITEMS_PER_REQUEST,
            chunk_delay: CHUNK_DELAY,
        }
    }
}

/// Result of populating one playlist: the outcome so far and, if the run
/// has to stop, the search fault that caused it.
pub struct PopulateResult {
    pub outcome: MigrationOutcome,
    pub fault: Option<(String, MigrationError)>,
}

/// Drives the destination side of a run, one playlist at a time.
pub struct PlaylistMigrator<'a> {
    tidal: &'a TidalClient,
    report: NotFoundReport,
    options: MigrationOptions,
}

impl<'a> PlaylistMigrator<'a> {
    pub fn new(tidal: &'a TidalClient, report: NotFoundReport) -> Self {
        Self::with_options(tidal, report, MigrationOptions::default())
    }

    pub fn with_options(
        tidal: &'a TidalClient,
        report: NotFoundReport,
        options: MigrationOptions,
    ) -> Self {
        Self {
            tidal,
            report,
            options,
        }
    }

    pub fn report(&self) -> &NotFoundReport {
        &self.report
    }

    /// Searches every track of `playlist` and inserts the matches into the
    /// already created destination playlist.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Id of the destination playlist
    /// * `playlist` - Source playlist whose tracks are searched in order
    ///
    /// # Returns
    ///
    /// The outcome with its final state. `fault` holds the track name and the
    /// error when a search failed; matches found before it are still
    /// inserted and the playlist ends `Aborted`.
    pub async fn populate(&mut self, playlist_id: &str, playlist: &Playlist) -> PopulateResult {
        let mut outcome = MigrationOutcome {
            playlist_name: playlist.name.clone(),
            destination_playlist_id: playlist_id.to_string(),
            inserted_count: 0,
            unmatched: Vec::new(),
            state: PlaylistState::Created,
        };
        let mut pending: Vec<String> = Vec::new();
        let mut fault = None;

        outcome.state = PlaylistState::Populating;

        for track in &playlist.tracks {
            match self
                .tidal
                .search_track(&track.name, &track.artist_names())
                .await
            {
                Ok(MatchResult::Matched {
                    destination_track_id,
                }) => pending.push(destination_track_id),
                Ok(MatchResult::NotFound) => {
                    info!(
                        "No results found for '{}' by {}",
                        track.name,
                        track.artist_names().join(", ")
                    );
                    if let Err(e) = self.report.append(&playlist.name, track).await {
                        warning!("Failed to write not-found report: {}", e);
                    }
                    outcome.unmatched.push((track.clone(), playlist.name.clone()));
                }
                Err(e) => {
                    warning!("Search failed for track: {}", track.name);
                    warning!(
                        "Playlist population aborted for playlist: {}",
                        playlist.name
                    );
                    fault = Some((track.name.clone(), e));
                    break;
                }
            }
        }

        outcome.inserted_count = self
            .tidal
            .add_tracks(
                playlist_id,
                &playlist.name,
                &pending,
                self.options.chunk_size,
                self.options.chunk_delay,
            )
            .await;
        outcome.state = if fault.is_some() {
            PlaylistState::Aborted
        } else {
            PlaylistState::Completed
        };

        PopulateResult { outcome, fault }
    }

    /// Creates and populates one playlist. Fails only when the playlist
    /// cannot be created.
    pub async fn migrate_playlist(&mut self, playlist: &Playlist) -> Result<PopulateResult> {
        let playlist_id = self.tidal.create_playlist(&playlist.name).await?;
        info!("Created TIDAL playlist: {}", playlist.name);
        Ok(self.populate(&playlist_id, playlist).await)
    }

    /// Migrates playlists in order, stopping at the first search fault.
    ///
    /// A playlist that cannot be created is recorded in
    /// [`RunSummary::failed_playlists`] and the run moves on.
    ///
    /// # Returns
    ///
    /// Totals over all processed playlists, the report path when tracks were
    /// missing and the abort reason if the run stopped early.
    pub async fn run(&mut self, playlists: &[Playlist]) -> RunSummary {
        let mut summary = RunSummary::default();

        for playlist in playlists {
            let result = match self.migrate_playlist(playlist).await {
                Ok(result) => result,
                Err(e) => {
                    warning!("{}", e);
                    summary.failed_playlists.push(playlist.name.clone());
                    continue;
                }
            };

            summary.playlists_processed += 1;
            summary.tracks_inserted += result.outcome.inserted_count;
            summary.tracks_not_found += result.outcome.unmatched.len();

            if let Some((track_name, e)) = result.fault {
                summary.aborted = Some(AbortReason {
                    playlist_name: playlist.name.clone(),
                    track_name,
                    message: e.to_string(),
                });
                break;
            }
        }

        if summary.tracks_not_found > 0 {
            summary.report_path = Some(self.report.path().to_path_buf());
        }
        summary
    }
}
