//! Error types shared by every stage of a migration.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while reading from Spotify or writing to TIDAL.
///
/// Which variant is fatal depends on where it is raised: pagination errors
/// never reach the caller (the listing just ends early), a `Search` error
/// aborts the whole run, and a failed insert chunk is only logged.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider kept answering 429 beyond the configured retry cap
    #[error("{provider} rate limit still active after {retries} retries")]
    RateLimited { provider: &'static str, retries: u32 },

    /// Provider answered with a non-2xx status other than 429
    #[error("{provider} responded with {status}: {body}")]
    Http {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Token exchange failed
    #[error("{provider} authorization failed ({status}): {body}")]
    Auth {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Destination playlist could not be created
    #[error("failed to create playlist '{name}' ({status}): {body}")]
    Create {
        name: String,
        status: StatusCode,
        body: String,
    },

    /// Destination search failed in a way that is not "no results"
    #[error("search for '{query}' failed: {reason}")]
    Search { query: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Redirect carried a `state` different from the one we generated
    #[error("state mismatch, possible CSRF attack")]
    CsrfMismatch,

    /// Redirect lacked `code` or `state`
    #[error("missing code or state parameter in redirect")]
    MissingParams,

    /// Local redirect listener could not be started or stopped unexpectedly
    #[error("redirect listener failed: {0}")]
    Listener(String),

    /// Required configuration value is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl MigrationError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            MigrationError::Http { status, .. }
            | MigrationError::Auth { status, .. }
            | MigrationError::Create { status, .. } => Some(*status),
            MigrationError::Request(err) => err.status(),
            _ => None,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, MigrationError>;
