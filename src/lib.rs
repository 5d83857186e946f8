//! Spotify to TIDAL migration library
//!
//! Reads a user's Spotify playlists and liked songs, stores them in an
//! intermediate JSON document and re-creates them on TIDAL by searching each
//! track by title and artists.
//!
//! # Modules
//!
//! - `api` - handler for the local OAuth redirect listener
//! - `cli` - command implementations used by the binary
//! - `config` - environment based configuration
//! - `error` - error taxonomy shared by all stages
//! - `http` - HTTP client with timeout and 429 retry handling
//! - `management` - intermediate library document and not-found report
//! - `migrator` - playlist creation, track matching and insertion on TIDAL
//! - `oauth` - per-attempt authorization sessions (CSRF state, PKCE)
//! - `server` - one-shot loopback listener for OAuth redirects
//! - `spotify` - Spotify authorization and library enumeration
//! - `tidal` - TIDAL authorization, search and playlist endpoints
//! - `types` - data model and provider payloads
//! - `utils` - generators, selection parsing and console helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod management;
pub mod migrator;
pub mod oauth;
pub mod server;
pub mod spotify;
pub mod tidal;
pub mod types;
pub mod utils;

pub use error::{MigrationError, Result};

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Loading tracks from {} playlists...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits the process with status 1.
///
/// Reserved for the abort paths of the binary: failed authorization,
/// unreadable library document, search faults. Library code returns errors
/// instead.
///
/// ```
/// error!("TIDAL authorization failed. Exiting.");
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for recoverable problems: retries, skipped
/// chunks, listings that ended early.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
