use std::time::Duration;

use lotwatch_core::{Listing, ListingSource, SearchTarget};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::parse::parse_search_results;
use crate::query::{parse_base_url, search_url};

/// HTTP client for eBay's search-results pages.
///
/// Each request is a single GET with the configured timeout and
/// `User-Agent`. Non-2xx responses surface as
/// [`ScraperError::UnexpectedStatus`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct EbayClient {
    client: Client,
    base_url: Url,
    buy_it_now_only: bool,
}

impl EbayClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        buy_it_now_only: bool,
    ) -> Result<Self, ScraperError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            buy_it_now_only,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search URL for `target` with this client's filters.
    #[must_use]
    pub fn url_for(&self, target: &SearchTarget) -> Url {
        search_url(&self.base_url, target, self.buy_it_now_only)
    }

    /// Fetches one search-results page and parses its listings.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network, TLS or timeout failure.
    pub async fn fetch_search(&self, url: &Url) -> Result<Vec<Listing>, ScraperError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let listings = parse_search_results(&body);
        tracing::debug!(%url, count = listings.len(), "parsed search results");
        Ok(listings)
    }
}

impl ListingSource for EbayClient {
    type Error = ScraperError;

    async fn fetch_listings(&self, target: &SearchTarget) -> Result<Vec<Listing>, ScraperError> {
        let url = self.url_for(target);
        self.fetch_search(&url).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
