//! # TIDAL Module
//!
//! Destination side of the migration, built on the TIDAL OpenAPI v2
//! (JSON:API documents).
//!
//! - [`auth`] - authorization code flow with PKCE (S256); the token request
//!   carries the client id and the code verifier instead of a secret.
//! - [`search`] - track lookup by `"<title> <artist> <artist>..."`, taking
//!   the first track TIDAL ranks for the query.
//! - [`playlist`] - playlist creation and bulk insertion of track ids in
//!   chunks of at most 20.
//!
//! All requests go through [`crate::http::RateLimitedClient`] with the TIDAL
//! retry policy: on 429 wait `Retry-After` (or 5 seconds) plus one second and
//! send the identical request again.

pub mod auth;
pub mod playlist;
pub mod search;

use crate::{
    config::TidalSettings,
    error::Result,
    http::{RateLimitedClient, RetryPolicy},
};

pub use auth::PROVIDER;
pub use search::build_search_query;

/// Authenticated TIDAL API client.
pub struct TidalClient {
    http: RateLimitedClient,
    api_url: String,
    token: String,
    country_code: String,
}

impl TidalClient {
    pub fn new(api_url: &str, token: String, country_code: &str) -> Result<Self> {
        Self::with_policy(api_url, token, country_code, RetryPolicy::tidal())
    }

    pub fn with_policy(
        api_url: &str,
        token: String,
        country_code: &str,
        policy: RetryPolicy,
    ) -> Result<Self> {
        Ok(Self {
            http: RateLimitedClient::new(PROVIDER, policy)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            country_code: country_code.to_string(),
        })
    }

    pub fn from_settings(settings: &TidalSettings, token: String) -> Result<Self> {
        Self::new(&settings.api_url, token, &settings.country_code)
    }
}
