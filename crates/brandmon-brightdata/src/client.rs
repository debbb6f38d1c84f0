//! HTTP client construction for the Bright Data proxy and dataset API.
//!
//! Two `reqwest` clients are kept: one routed through the authenticated
//! super-proxy for SERP requests, and one talking directly to the dataset
//! API with bearer auth. Use [`BrightDataClient::from_config`] in production
//! and [`BrightDataClient::with_base_urls`] against a mock server in tests.

use std::time::Duration;

use brandmon_core::AppConfig;
use reqwest::{Client, Proxy, Url};

use crate::error::BrightDataError;

const USER_AGENT: &str = "brandmon/0.1 (brand-monitoring)";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for Bright Data search and scraping.
pub struct BrightDataClient {
    pub(crate) search_http: Client,
    pub(crate) api_http: Client,
    pub(crate) api_key: String,
    pub(crate) api_base: Url,
    pub(crate) search_url: Url,
    pub(crate) search_recency: String,
    pub(crate) poll_interval: Duration,
    pub(crate) scrape_timeout: Duration,
}

impl BrightDataClient {
    /// Builds a client from application config, routing search through the
    /// super-proxy with the configured username and password.
    ///
    /// Certificate verification is disabled on the proxied client only: the
    /// super-proxy re-signs upstream TLS with its own CA.
    ///
    /// # Errors
    ///
    /// - [`BrightDataError::Http`] if a `reqwest::Client` or the proxy cannot
    ///   be constructed.
    /// - [`BrightDataError::InvalidBaseUrl`] if a configured URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, BrightDataError> {
        let proxy = Proxy::all(format!("http://{}:{}", config.proxy_host, config.proxy_port))?
            .basic_auth(&config.bright_data_username, &config.bright_data_password);

        let search_http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .proxy(proxy)
            .danger_accept_invalid_certs(true)
            .build()?;

        let client = Self::build(
            search_http,
            &config.bright_data_api_key,
            &config.bright_data_api_url,
            &config.search_url,
            config.request_timeout_secs,
        )?;
        Ok(client
            .with_search_recency(&config.search_recency)
            .with_polling(config.scrape_poll_interval(), config.scrape_timeout()))
    }

    /// Builds an unproxied client pointed at custom endpoints (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// - [`BrightDataError::Http`] if a `reqwest::Client` cannot be constructed.
    /// - [`BrightDataError::InvalidBaseUrl`] if either URL does not parse.
    pub fn with_base_urls(
        api_key: &str,
        api_base_url: &str,
        search_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, BrightDataError> {
        let search_http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Self::build(search_http, api_key, api_base_url, search_url, timeout_secs)
    }

    /// Overrides the progress poll interval and the overall snapshot timeout.
    #[must_use]
    pub fn with_polling(mut self, poll_interval: Duration, scrape_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.scrape_timeout = scrape_timeout;
        self
    }

    /// Overrides the Google `tbs=qdr:<x>` recency window (`d`, `w`, `m`, `y`).
    #[must_use]
    pub fn with_search_recency(mut self, recency: &str) -> Self {
        self.search_recency = recency.to_string();
        self
    }

    fn build(
        search_http: Client,
        api_key: &str,
        api_base_url: &str,
        search_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, BrightDataError> {
        let api_http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            search_http,
            api_http,
            api_key: api_key.to_owned(),
            api_base: normalise_base_url(api_base_url)?,
            search_url: Url::parse(search_url).map_err(|e| BrightDataError::InvalidBaseUrl {
                url: search_url.to_owned(),
                reason: e.to_string(),
            })?,
            search_recency: "w".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
        })
    }

    /// Resolves a path relative to the dataset API base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, BrightDataError> {
        self.api_base
            .join(path)
            .map_err(|e| BrightDataError::InvalidBaseUrl {
                url: format!("{}{path}", self.api_base),
                reason: e.to_string(),
            })
    }
}

/// Ensures the base URL ends with exactly one slash so `Url::join` appends
/// rather than replacing the last path segment.
fn normalise_base_url(base_url: &str) -> Result<Url, BrightDataError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| BrightDataError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
