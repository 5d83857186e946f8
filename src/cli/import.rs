use std::{path::Path, time::Duration};

use tokio::time::sleep;

use crate::{
    config::TidalSettings,
    error, info,
    management::{LibraryManager, NotFoundReport},
    migrator::PlaylistMigrator,
    success,
    tidal::TidalClient,
    types::RunSummary,
    utils, warning,
};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub report: std::path::PathBuf,
    pub yes: bool,
}

/// Re-creates the playlists stored in `library` on TIDAL.
pub async fn import(library: &Path, opts: &ImportOptions) {
    let manager = match LibraryManager::load(library).await {
        Ok(manager) => manager,
        Err(e) => error!("Cannot read playlists: {}", e),
    };
    info!(
        "Loaded {} playlists with {} tracks from {}",
        manager.count_playlists(),
        manager.count_tracks(),
        library.display()
    );

    let settings = match TidalSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let token = super::auth::tidal_login(&settings).await;
    let client = match TidalClient::from_settings(&settings, token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create TIDAL client: {}", e),
    };

    if !opts.yes {
        if !utils::confirm("Start importing playlists into TIDAL?") {
            error!("Exiting.");
        }
        countdown(5).await;
    }

    let playlists = manager.into_playlists();
    let mut migrator = PlaylistMigrator::new(&client, NotFoundReport::new(&opts.report));
    let summary = migrator.run(&playlists).await;

    print_summary(&summary);
}

async fn countdown(seconds: u64) {
    for i in (1..=seconds).rev() {
        info!("Starting in {}...", i);
        sleep(Duration::from_secs(1)).await;
    }
}

fn print_summary(summary: &RunSummary) {
    info!(
        "Playlists processed: {}, tracks added: {}, tracks not found: {}",
        summary.playlists_processed, summary.tracks_inserted, summary.tracks_not_found
    );

    for name in &summary.failed_playlists {
        warning!("Playlist '{}' could not be created and was skipped.", name);
    }

    if let Some(path) = &summary.report_path {
        info!("Tracks not found on TIDAL were written to {}", path.display());
    }

    if let Some(reason) = &summary.aborted {
        error!(
            "Aborting operation due to a search error in playlist '{}' at track '{}': {}",
            reason.playlist_name,
            reason.track_name,
            reason.message
        );
    }

    success!("Migration finished.");
}
