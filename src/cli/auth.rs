use crate::{
    config::{SpotifySettings, TidalSettings},
    error,
    http::{RateLimitedClient, RetryPolicy},
    oauth::{AuthorizationGrant, AuthorizationSession, AuthorizeRequest},
    spotify, success, tidal, utils, warning,
};

/// Runs the browser authorization until it succeeds or the user gives up.
async fn authorize(request: AuthorizeRequest) -> AuthorizationGrant {
    loop {
        let session = match AuthorizationSession::begin(request.clone()).await {
            Ok(session) => session,
            Err(e) => error!("Cannot start {} authorization: {}", request.provider, e),
        };

        match session.await_result().await {
            Ok(grant) => return grant,
            Err(e) => {
                warning!("{} authorization failed: {}", request.provider, e);
                if !utils::confirm(&format!(
                    "{} authorization failed. Do you want to try again?",
                    request.provider
                )) {
                    error!("Exiting.");
                }
            }
        }
    }
}

/// Signs in to Spotify and returns an access token.
pub async fn spotify_login(settings: &SpotifySettings) -> String {
    let grant = authorize(spotify::auth::authorize_request(settings)).await;

    let http = match RateLimitedClient::new(spotify::auth::PROVIDER, RetryPolicy::spotify()) {
        Ok(http) => http,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };

    match spotify::auth::exchange_code(&http, settings, &grant.code).await {
        Ok(token) => {
            success!("Spotify login successful.");
            token
        }
        Err(e) => error!("Failed to retrieve Spotify access token. {}", e),
    }
}

/// Signs in to TIDAL with PKCE and returns an access token.
pub async fn tidal_login(settings: &TidalSettings) -> String {
    let grant = authorize(tidal::auth::authorize_request(settings)).await;

    let http = match RateLimitedClient::new(tidal::PROVIDER, RetryPolicy::tidal()) {
        Ok(http) => http,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };

    match tidal::auth::exchange_code(&http, settings, &grant).await {
        Ok(token) => {
            success!("TIDAL login successful.");
            token
        }
        Err(e) => error!("Failed to retrieve TIDAL access token. {}", e),
    }
}
