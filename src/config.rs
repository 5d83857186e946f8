//! Configuration management for spotidal.
//!
//! Values come from environment variables, which can be provided through a
//! `.env` file in the working directory or in the local data directory under
//! `spotidal/.env`. Client credentials are required; endpoints, redirect
//! ports and the TIDAL country code fall back to defaults.

use std::{env, path::PathBuf};

use crate::error::{MigrationError, Result};

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_SCOPE: &str = "playlist-read-private user-library-read";
pub const SPOTIFY_REDIRECT_PORT: u16 = 8000;

pub const TIDAL_API_URL: &str = "https://openapi.tidal.com/v2";
pub const TIDAL_AUTH_URL: &str = "https://login.tidal.com/authorize";
pub const TIDAL_TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";
pub const TIDAL_SCOPE: &str = "user.read search.read playlists.write playlists.read";
pub const TIDAL_REDIRECT_PORT: u16 = 3000;
pub const TIDAL_COUNTRY_CODE: &str = "DE";

/// Loads environment variables from `.env` files.
///
/// The working directory is read first, then the local data directory:
/// - Linux: `~/.local/share/spotidal/.env`
/// - macOS: `~/Library/Application Support/spotidal/.env`
/// - Windows: `%LOCALAPPDATA%/spotidal/.env`
///
/// Variables already set in the environment win. Missing files are not an
/// error since the credentials may come from the environment alone.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::dotenv().ok();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the `.env` file in the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotidal/.env");
    path
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MigrationError::Config(format!("{key} must be set"))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn port(key: &str, default: u16) -> Result<u16> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u16>()
            .map_err(|e| MigrationError::Config(format!("{key} is not a valid port: {e}"))),
        _ => Ok(default),
    }
}

/// Redirect URI registered with a provider for the given loopback port.
pub fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{port}/callback")
}

/// Client id of the Spotify application (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Client secret of the Spotify application (`SPOTIFY_CLIENT_SECRET`).
///
/// Spotify's token endpoint expects it as HTTP Basic credentials together
/// with the client id.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Client id of the TIDAL application (`TIDAL_CLIENT_ID`). TIDAL uses PKCE,
/// so no secret is needed.
pub fn tidal_client_id() -> Result<String> {
    required("TIDAL_CLIENT_ID")
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_port: u16,
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            api_url: optional("SPOTIFY_API_URL", SPOTIFY_API_URL),
            auth_url: optional("SPOTIFY_AUTH_URL", SPOTIFY_AUTH_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", SPOTIFY_TOKEN_URL),
            redirect_port: port("SPOTIFY_REDIRECT_PORT", SPOTIFY_REDIRECT_PORT)?,
        })
    }

    pub fn redirect_uri(&self) -> String {
        redirect_uri(self.redirect_port)
    }
}

#[derive(Debug, Clone)]
pub struct TidalSettings {
    pub client_id: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_port: u16,
    pub country_code: String,
}

impl TidalSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: tidal_client_id()?,
            api_url: optional("TIDAL_API_URL", TIDAL_API_URL),
            auth_url: optional("TIDAL_AUTH_URL", TIDAL_AUTH_URL),
            token_url: optional("TIDAL_TOKEN_URL", TIDAL_TOKEN_URL),
            redirect_port: port("TIDAL_REDIRECT_PORT", TIDAL_REDIRECT_PORT)?,
            country_code: optional("TIDAL_COUNTRY_CODE", TIDAL_COUNTRY_CODE),
        })
    }

    pub fn redirect_uri(&self) -> String {
        redirect_uri(self.redirect_port)
    }
}
