//! HTTP client with a fixed request timeout and 429 handling.
//!
//! Every call to Spotify and TIDAL goes through [`RateLimitedClient::send`].
//! The request is described by a closure so the exact same request can be
//! rebuilt and re-issued after a rate limit backoff.

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use tokio::time::sleep;

use crate::{
    error::{MigrationError, Result},
    warning,
};

/// Ceiling applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// How long to back off when a provider answers 429.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait used when the response carries no usable `Retry-After` header.
    pub default_wait: Duration,
    /// Added to every wait, with or without `Retry-After`.
    pub margin: Duration,
    /// `None` retries forever.
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    /// Spotify: 5 seconds without guidance, no margin.
    pub fn spotify() -> Self {
        Self {
            default_wait: Duration::from_secs(5),
            margin: Duration::ZERO,
            max_retries: None,
        }
    }

    /// TIDAL: `Retry-After` or 5 seconds, plus one second.
    pub fn tidal() -> Self {
        Self {
            default_wait: Duration::from_secs(5),
            margin: Duration::from_secs(1),
            max_retries: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Wait for a 429 response given its `Retry-After` value in seconds.
    pub fn wait_for(&self, retry_after: Option<u64>) -> Duration {
        retry_after
            .map(Duration::from_secs)
            .unwrap_or(self.default_wait)
            + self.margin
    }
}

/// Parses a `Retry-After` header holding an integer number of seconds.
pub fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Reads an error body for diagnostics, pretty-printing it when it is JSON.
pub async fn error_body(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(text),
        Err(_) => text,
    }
}

#[derive(Debug)]
pub struct RateLimitedClient {
    client: Client,
    provider: &'static str,
    policy: RetryPolicy,
    retries: AtomicU32,
}

impl RateLimitedClient {
    pub fn new(provider: &'static str, policy: RetryPolicy) -> Result<Self> {
        Self::with_timeout(provider, policy, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        provider: &'static str,
        policy: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            provider,
            policy,
            retries: AtomicU32::new(0),
        })
    }

    /// Number of 429 retries issued over the lifetime of this client.
    pub fn retry_count(&self) -> u32 {
        self.retries.load(Ordering::Relaxed)
    }

    /// Sends the request produced by `build`, retrying it on 429.
    ///
    /// Returns the response for any 2xx status. Any other status fails with
    /// [`MigrationError::Http`] carrying the status and the error body; the
    /// caller decides whether that is fatal.
    pub async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt_retries: u32 = 0;

        loop {
            let response = build(&self.client).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                if let Some(max) = self.policy.max_retries {
                    if attempt_retries >= max {
                        return Err(MigrationError::RateLimited {
                            provider: self.provider,
                            retries: attempt_retries,
                        });
                    }
                }

                let wait = self.policy.wait_for(retry_after_secs(&response));
                warning!(
                    "{} rate limit exceeded ({}). Retrying after {} seconds...",
                    self.provider,
                    status.as_u16(),
                    wait.as_secs_f32()
                );
                attempt_retries += 1;
                self.retries.fetch_add(1, Ordering::Relaxed);
                sleep(wait).await;
                continue;
            }

            if status.is_success() {
                return Ok(response);
            }

            return Err(MigrationError::Http {
                provider: self.provider,
                status,
                body: error_body(response).await,
            });
        }
    }
}
