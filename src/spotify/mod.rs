//! # Spotify Module
//!
//! Source side of the migration: authorization against Spotify and read-only
//! enumeration of the user's library.
//!
//! ## Authentication
//!
//! [`auth`] builds the authorize request for the plain authorization code
//! flow and exchanges the returned code for an access token. Spotify expects
//! the client credentials as HTTP Basic auth on the token endpoint, so the
//! client secret is required. Tokens are kept in memory for the run only.
//!
//! ## Library enumeration
//!
//! [`playlists`] exposes the three listings the migration needs:
//!
//! - `GET /me/playlists` - playlist ids and names
//! - `GET /playlists/{id}/tracks` - entries of one playlist
//! - `GET /me/tracks` - liked songs
//!
//! All three use `limit`/`offset` pagination and are read through
//! [`pagination::Paginator`], 50 items per page. Rate limits (429) are
//! retried with the same offset by the HTTP client; other errors end the
//! listing early with the items fetched so far.
//!
//! Entries are normalized to [`crate::types::Track`] (name and artists only),
//! dropping entries whose track reference is null.

pub mod auth;
pub mod pagination;
pub mod playlists;

pub use playlists::{SpotifyClient, normalize_entries};
