use std::{collections::BTreeSet, io::Write, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Track;

/// Length of the CSRF `state` sent with authorization requests.
pub const STATE_LENGTH: usize = 16;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// 32 random bytes, URL-safe base64 without padding (43 characters).
pub fn generate_code_verifier() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// One line of the not-found report.
pub fn not_found_line(playlist_name: &str, track: &Track) -> String {
    format!(
        "In playlist {}: {} by {}",
        playlist_name,
        track.name,
        track.artist_names().join(", ")
    )
}

/// Which playlists of the printed list take part in the migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Include(BTreeSet<usize>),
    Exclude(BTreeSet<usize>),
}

impl Selection {
    /// Keeps only the given indices. An empty set selects everything, so an
    /// answer without a usable index never empties the export.
    pub fn include(indices: BTreeSet<usize>) -> Self {
        if indices.is_empty() {
            Selection::All
        } else {
            Selection::Include(indices)
        }
    }

    /// Drops the given indices. An empty set selects everything.
    pub fn exclude(indices: BTreeSet<usize>) -> Self {
        if indices.is_empty() {
            Selection::All
        } else {
            Selection::Exclude(indices)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match self {
            Selection::All => true,
            Selection::Include(set) => set.contains(&index),
            Selection::Exclude(set) => !set.contains(&index),
        }
    }

    /// Keeps the selected items, preserving their order.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .enumerate()
            .filter(|(i, _)| self.contains(*i))
            .map(|(_, item)| item)
            .collect()
    }
}

/// Parses a comma separated list of indices. Entries that are not numbers or
/// are out of range are ignored.
pub fn parse_indices(input: &str, len: usize) -> BTreeSet<usize> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|i| *i < len)
        .collect()
}

/// Asks a question on stdin and returns the trimmed answer.
pub fn prompt(question: &str) -> String {
    print!("{} ", question);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return String::new();
    }
    answer.trim().to_string()
}

/// Yes/no question; only `y`/`Y` counts as yes.
pub fn confirm(question: &str) -> bool {
    prompt(&format!("{} (y/n):", question)).eq_ignore_ascii_case("y")
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb
}
