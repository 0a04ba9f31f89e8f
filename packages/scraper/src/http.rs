//! HTTP client wrapper for downloading pages from volby.cz.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::Html;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{Result, ScraperError};

/// User agent string identifying this scraper.
const USER_AGENT: &str = concat!("volby-scraper/", env!("CARGO_PKG_VERSION"));

/// Source of raw HTML pages.
///
/// The aggregator only talks to this trait, so tests can serve pages from
/// memory instead of the network.
pub trait PageSource {
    /// Retrieve the body of `url` as text.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// [`PageSource`] backed by a blocking reqwest client.
///
/// Every call is a single GET; failures are not retried.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
        })
    }
}

impl PageSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Downloading page");

        let fetch_error = |source| ScraperError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;
        response.text().map_err(fetch_error)
    }
}

/// Download a page and parse it into a queryable HTML document.
pub fn fetch_document<S: PageSource + ?Sized>(source: &S, url: &str) -> Result<Html> {
    let body = source.fetch_text(url)?;
    Ok(Html::parse_document(&body))
}
