use std::path::{Path, PathBuf};

use crate::{
    error::{MigrationError, Result},
    types::Playlist,
};

/// Default location of the intermediate library document.
pub const DEFAULT_LIBRARY_FILE: &str = "playlists.json";

/// The intermediate JSON document handed from the export to the import.
///
/// Schema: an array of `{playlist_name, tracks: [{track_name, artist_name:
/// [{name}]}]}`. Extra fields are ignored on load, missing ones fail.
pub struct LibraryManager {
    playlists: Vec<Playlist>,
}

impl LibraryManager {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self { playlists }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| MigrationError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let playlists: Vec<Playlist> =
            serde_json::from_str(&content).map_err(|source| MigrationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { playlists })
    }

    pub async fn persist(&self, path: &Path) -> Result<()> {
        let io_error = |source| MigrationError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(&self.playlists).map_err(|source| {
            MigrationError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        async_fs::write(path, json).await.map_err(io_error)
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn into_playlists(self) -> Vec<Playlist> {
        self.playlists
    }

    pub fn count_playlists(&self) -> usize {
        self.playlists.len()
    }

    pub fn count_tracks(&self) -> usize {
        self.playlists.iter().map(|p| p.tracks.len()).sum()
    }
}

pub fn default_library_path() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARY_FILE)
}
