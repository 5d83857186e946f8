use reqwest::StatusCode;

use crate::{
    config::{TIDAL_SCOPE, TidalSettings},
    error::{MigrationError, Result},
    http::{RateLimitedClient, error_body},
    oauth::{AuthorizationGrant, AuthorizeRequest},
    types::TidalToken,
};

pub const PROVIDER: &str = "TIDAL";

/// Authorize request for the TIDAL authorization code flow with PKCE.
pub fn authorize_request(settings: &TidalSettings) -> AuthorizeRequest {
    AuthorizeRequest {
        provider: PROVIDER,
        authorize_url: settings.auth_url.clone(),
        client_id: settings.client_id.clone(),
        redirect_uri: settings.redirect_uri(),
        scope: TIDAL_SCOPE.to_string(),
        port: settings.redirect_port,
        pkce: true,
    }
}

/// Exchanges the authorization code and PKCE verifier for an access token.
pub async fn exchange_code(
    http: &RateLimitedClient,
    settings: &TidalSettings,
    grant: &AuthorizationGrant,
) -> Result<String> {
    let Some(verifier) = grant.code_verifier.as_deref() else {
        return Err(MigrationError::Config(
            "TIDAL authorization requires a PKCE code verifier".into(),
        ));
    };
    let redirect_uri = settings.redirect_uri();

    let response = http
        .send(|client| {
            client.post(&settings.token_url).form(&[
                ("grant_type", "authorization_code"),
                ("client_id", settings.client_id.as_str()),
                ("code", grant.code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("code_verifier", verifier),
            ])
        })
        .await
        .map_err(|err| match err {
            MigrationError::Http { status, body, .. } => MigrationError::Auth {
                provider: PROVIDER,
                status,
                body,
            },
            other => other,
        })?;

    if response.status() != StatusCode::OK {
        return Err(MigrationError::Auth {
            provider: PROVIDER,
            status: response.status(),
            body: error_body(response).await,
        });
    }

    let token = response.json::<TidalToken>().await?;
    Ok(token.access_token)
}
