//! Browser based OAuth 2.0 authorization code flow.
//!
//! An [`AuthorizationSession`] owns everything one authorization attempt
//! needs: the CSRF `state`, the PKCE verifier (for providers that use PKCE)
//! and the loopback listener that receives the redirect. A new attempt
//! means a new session, so no value is ever shared between attempts or
//! providers.

use std::net::{Ipv4Addr, SocketAddr};

use reqwest::Url;

use crate::{
    api::RedirectOutcome,
    error::{MigrationError, Result},
    info,
    server::RedirectListener,
    utils, warning,
};

/// Static description of a provider's authorize endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub provider: &'static str,
    pub authorize_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub port: u16,
    pub pkce: bool,
}

#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    pub fn generate() -> Self {
        let verifier = utils::generate_code_verifier();
        let challenge = utils::generate_code_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Code returned by the provider, with the verifier to send along with it
/// when the provider uses PKCE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationGrant {
    pub code: String,
    pub code_verifier: Option<String>,
}

pub struct AuthorizationSession {
    request: AuthorizeRequest,
    state: String,
    pkce: Option<PkcePair>,
    listener: RedirectListener,
}

impl AuthorizationSession {
    /// Generates state and PKCE values and binds the loopback listener on
    /// `127.0.0.1:<port>`, without opening a browser.
    pub async fn prepare(request: AuthorizeRequest) -> Result<Self> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, request.port));
        let listener = RedirectListener::bind(request.provider, addr).await?;
        let pkce = request.pkce.then(PkcePair::generate);

        Ok(Self {
            state: utils::generate_state(),
            pkce,
            request,
            listener,
        })
    }

    /// Prepares the session and opens the authorize URL in the default
    /// browser. The URL is printed when no browser can be opened.
    pub async fn begin(request: AuthorizeRequest) -> Result<Self> {
        let session = Self::prepare(request).await?;
        let url = session.authorize_url()?;

        info!(
            "Please authorize the app with {} in your browser.",
            session.request.provider
        );
        if webbrowser::open(url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        }

        Ok(session)
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn pkce(&self) -> Option<&PkcePair> {
        self.pkce.as_ref()
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn authorize_url(&self) -> Result<Url> {
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.request.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", self.request.redirect_uri.as_str()),
            ("scope", self.request.scope.as_str()),
            ("state", self.state.as_str()),
        ];
        if let Some(pkce) = &self.pkce {
            params.push(("code_challenge_method", "S256"));
            params.push(("code_challenge", pkce.challenge.as_str()));
        }

        Url::parse_with_params(&self.request.authorize_url, &params).map_err(|e| {
            MigrationError::Config(format!(
                "invalid authorize URL {}: {e}",
                self.request.authorize_url
            ))
        })
    }

    /// Waits for the single redirect and validates it.
    pub async fn await_result(self) -> Result<AuthorizationGrant> {
        match self.listener.await_redirect(&self.state).await? {
            RedirectOutcome::Authorized { code } => Ok(AuthorizationGrant {
                code,
                code_verifier: self.pkce.map(|p| p.verifier),
            }),
            RedirectOutcome::CsrfMismatch => Err(MigrationError::CsrfMismatch),
            RedirectOutcome::MissingParams => Err(MigrationError::MissingParams),
        }
    }
}
