use std::collections::VecDeque;

use serde::de::DeserializeOwned;

use crate::{http::RateLimitedClient, info, types::Page, warning};

/// Page size used for every Spotify listing.
pub const PAGE_SIZE: u64 = 50;

/// Lazy, finite sequence over a `limit`/`offset` paginated Spotify listing.
///
/// The provider's `total` is taken from the first page and pagination stops once
/// `offset >= total`. Rate limits are retried by the HTTP client with the
/// same offset, so a 429 never skips or repeats a page. Any other failure
/// ends the sequence early; what was yielded so far stays valid. Once
/// exhausted the paginator cannot be restarted.
pub struct Paginator<'a, T> {
    http: &'a RateLimitedClient,
    token: &'a str,
    url: String,
    what: String,
    limit: u64,
    offset: u64,
    total: Option<u64>,
    buffer: VecDeque<T>,
    finished: bool,
    failed: bool,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    pub fn new(http: &'a RateLimitedClient, token: &'a str, url: String, what: &str) -> Self {
        Self::with_limit(http, token, url, what, PAGE_SIZE)
    }

    pub fn with_limit(
        http: &'a RateLimitedClient,
        token: &'a str,
        url: String,
        what: &str,
        limit: u64,
    ) -> Self {
        Self {
            http,
            token,
            url,
            what: what.to_string(),
            limit: limit.max(1),
            offset: 0,
            total: None,
            buffer: VecDeque::new(),
            finished: false,
            failed: false,
        }
    }

    /// Total reported by the provider, known after the first page.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether the sequence ended because of an error rather than reaching
    /// the reported total.
    pub fn failed(&self) -> bool {
        self.failed
    }

    fn stop(&mut self) {
        self.finished = true;
    }

    /// Fetches the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<Vec<T>> {
        if self.finished {
            return None;
        }
        if let Some(total) = self.total {
            if self.offset >= total {
                self.stop();
                return None;
            }
        }

        let limit = self.limit.to_string();
        let offset = self.offset.to_string();
        let response = self
            .http
            .send(|client| {
                client
                    .get(&self.url)
                    .bearer_auth(self.token)
                    .query(&[("limit", limit.as_str()), ("offset", offset.as_str())])
            })
            .await;

        let page = match response {
            Ok(resp) => resp.json::<Page<T>>().await,
            Err(e) => {
                warning!("Failed to retrieve {}: {}", self.what, e);
                self.failed = true;
                self.stop();
                return None;
            }
        };

        let page = match page {
            Ok(page) => page,
            Err(e) => {
                warning!("Failed to read {} page: {}", self.what, e);
                self.failed = true;
                self.stop();
                return None;
            }
        };

        let total = match self.total {
            Some(total) => total,
            None => {
                if page.total == 0 {
                    info!("No {} found.", self.what);
                }
                self.total = Some(page.total);
                page.total
            }
        };
        self.offset += self.limit;
        if self.offset >= total {
            self.stop();
        }

        Some(page.items)
    }

    /// Next single item, fetching pages as needed.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(item);
            }
            let page = self.next_page().await?;
            self.buffer.extend(page);
        }
    }

    /// Drains the sequence into a vector.
    pub async fn collect_all(mut self) -> Vec<T> {
        let mut items: Vec<T> = self.buffer.drain(..).collect();
        while let Some(page) = self.next_page().await {
            items.extend(page);
        }
        items
    }
}
