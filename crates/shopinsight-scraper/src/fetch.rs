//! Bounded-timeout HTTP GET that never fails on transport problems.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Outcome of a single GET.
///
/// `status` is `None` when no usable response arrived (timeout, DNS failure,
/// refused connection, unreadable body).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: Option<u16>,
    pub body: String,
}

impl FetchedPage {
    /// `true` when a response arrived with a 2xx status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_some_and(|s| (200..300).contains(&s))
    }

    #[must_use]
    pub fn has_status(&self, code: u16) -> bool {
        self.status == Some(code)
    }

    fn failed() -> Self {
        Self {
            status: None,
            body: String::new(),
        }
    }
}

/// HTTP fetcher shared by every extraction step.
///
/// Each call is bounded by the configured timeout and is attempted exactly
/// once. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a `Fetcher` with the given per-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns whatever came back.
    ///
    /// Non-2xx responses keep their status and body; transport failures come
    /// back with `status: None`.
    pub async fn fetch(&self, url: &str) -> FetchedPage {
        let response = match self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/json;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, timeout = e.is_timeout(), "fetch failed");
                return FetchedPage::failed();
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                tracing::debug!(url, status, bytes = body.len(), "fetched");
                FetchedPage {
                    status: Some(status),
                    body,
                }
            }
            Err(e) => {
                tracing::warn!(url, status, error = %e, "failed to read response body");
                FetchedPage::failed()
            }
        }
    }
}
