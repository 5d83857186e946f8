//! # CLI Module
//!
//! User-facing commands. Each command drives the library layers, talks to
//! the user and exits through [`crate::error!`] on fatal problems.
//!
//! - [`export`] - sign in to Spotify, pick playlists and write the library
//!   file.
//! - [`import`] - sign in to TIDAL and re-create every playlist of the
//!   library file.
//! - [`migrate`] - both of the above, one after the other.
//!
//! ```bash
//! spotidal migrate
//! spotidal export --library backup.json --exclude 0,3 --no-liked
//! spotidal import --library backup.json --report missing.txt --yes
//! ```

mod auth;
mod export;
mod import;
mod migrate;

pub use auth::{spotify_login, tidal_login};
pub use export::{ExportOptions, export};
pub use import::{ImportOptions, import};
pub use migrate::migrate;
