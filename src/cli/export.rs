use std::path::Path;

use tabled::Table;

use crate::{
    config::SpotifySettings,
    error, info,
    management::LibraryManager,
    spotify::SpotifyClient,
    success,
    types::{PlaylistStub, PlaylistTableRow},
    utils::{self, Selection},
    warning,
};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub no_liked: bool,
    pub yes: bool,
}

/// Reads the Spotify library and writes it to `library`.
pub async fn export(library: &Path, opts: &ExportOptions) {
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let token = super::auth::spotify_login(&settings).await;
    let client = match SpotifyClient::from_settings(&settings, token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    match client.current_user().await {
        Ok(user) => info!(
            "Signed in as {}",
            user.display_name.unwrap_or(user.id)
        ),
        Err(e) => warning!("Failed to retrieve Spotify user: {}", e),
    }

    let pb = utils::spinner("Loading playlists (this may take a while)...");
    let stubs: Vec<PlaylistStub> = client.playlists().collect_all().await;
    pb.finish_and_clear();

    info!("Received the following playlists from Spotify:");
    print_playlists(&stubs);

    let selection = selection_from(opts, stubs.len());
    let selected = selection.apply(stubs);

    match &selection {
        Selection::All => info!("All playlists will be transferred."),
        _ => {
            info!("The following playlists will be imported:");
            for stub in &selected {
                println!("  {}", stub.name);
            }
        }
    }

    if !opts.yes && !utils::confirm("Continue?") {
        error!("Exiting.");
    }

    info!("Loading tracks from Spotify playlists (this may take a while)...");
    let playlists = client.read_library(&selected, !opts.no_liked).await;

    let manager = LibraryManager::new(playlists);
    if let Err(e) = manager.persist(library).await {
        error!("Failed to save playlists: {}", e);
    }
    success!(
        "{} playlists with {} tracks saved to {}",
        manager.count_playlists(),
        manager.count_tracks(),
        library.display()
    );
}

fn print_playlists(stubs: &[PlaylistStub]) {
    let rows: Vec<PlaylistTableRow> = stubs
        .iter()
        .enumerate()
        .map(|(index, stub)| PlaylistTableRow {
            index,
            name: stub.name.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Selection from the command line flags, or asked interactively when no
/// flag is given and confirmations are not skipped.
fn selection_from(opts: &ExportOptions, len: usize) -> Selection {
    if let Some(include) = &opts.include {
        return Selection::include(utils::parse_indices(include, len));
    }
    if let Some(exclude) = &opts.exclude {
        return Selection::exclude(utils::parse_indices(exclude, len));
    }
    if opts.yes {
        return Selection::All;
    }

    match utils::prompt("Do you want to import all playlists (1) or specific ones (2)?:").as_str() {
        "2" => match utils::prompt("Do you want to include (1) or exclude (2) specific playlists?:")
            .as_str()
        {
            "1" => Selection::include(utils::parse_indices(
                &utils::prompt(
                    "Enter the index numbers of the playlists you want to include (comma separated):",
                ),
                len,
            )),
            "2" => Selection::exclude(utils::parse_indices(
                &utils::prompt(
                    "Enter the index numbers of the playlists you want to exclude (comma separated):",
                ),
                len,
            )),
            _ => Selection::All,
        },
        _ => Selection::All,
    }
}
