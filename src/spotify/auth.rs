use crate::{
    config::{SPOTIFY_SCOPE, SpotifySettings},
    error::{MigrationError, Result},
    http::{RateLimitedClient, error_body},
    oauth::AuthorizeRequest,
    types::SpotifyToken,
};

pub const PROVIDER: &str = "Spotify";

/// Authorize request for the Spotify authorization code flow (no PKCE).
pub fn authorize_request(settings: &SpotifySettings) -> AuthorizeRequest {
    AuthorizeRequest {
        provider: PROVIDER,
        authorize_url: settings.auth_url.clone(),
        client_id: settings.client_id.clone(),
        redirect_uri: settings.redirect_uri(),
        scope: SPOTIFY_SCOPE.to_string(),
        port: settings.redirect_port,
        pkce: false,
    }
}

/// Exchanges an authorization code for an access token.
///
/// Spotify authenticates the client with HTTP Basic credentials
/// (`client_id:client_secret`). Anything but 200 is an [`MigrationError::Auth`].
pub async fn exchange_code(
    http: &RateLimitedClient,
    settings: &SpotifySettings,
    code: &str,
) -> Result<String> {
    let redirect_uri = settings.redirect_uri();
    let response = http
        .send(|client| {
            client
                .post(&settings.token_url)
                .basic_auth(&settings.client_id, Some(&settings.client_secret))
                .form(&[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", redirect_uri.as_str()),
                ])
        })
        .await
        .map_err(into_auth_error)?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(MigrationError::Auth {
            provider: PROVIDER,
            status: response.status(),
            body: error_body(response).await,
        });
    }

    let token = response.json::<SpotifyToken>().await?;
    Ok(token.access_token)
}

fn into_auth_error(err: MigrationError) -> MigrationError {
    match err {
        MigrationError::Http { status, body, .. } => MigrationError::Auth {
            provider: PROVIDER,
            status,
            body,
        },
        other => other,
    }
}
