use std::path::{Path, PathBuf};

use async_fs::OpenOptions;
use futures::AsyncWriteExt;

use crate::{
    error::{MigrationError, Result},
    types::Track,
    utils,
};

pub const DEFAULT_REPORT_FILE: &str = "tidal_not_found.txt";

/// Append-only list of tracks that TIDAL could not match.
///
/// One line per track: `In playlist <name>: <track> by <artist>, <artist>`.
/// Existing content is kept; a run only ever appends.
pub struct NotFoundReport {
    path: PathBuf,
    written: usize,
}

impl NotFoundReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines appended by this instance.
    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn append(&mut self, playlist_name: &str, track: &Track) -> Result<()> {
        let io_error = |source| MigrationError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_error)?;

        let line = format!("{}\n", utils::not_found_line(playlist_name, track));
        file.write_all(line.as_bytes()).await.map_err(io_error)?;
        file.flush().await.map_err(io_error)?;

        self.written += 1;
        Ok(())
    }
}
