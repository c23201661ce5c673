//! Page fetching over HTTP.

use anyhow::{Context, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::rate_limiter::Throttle;
use crate::config::ScraperConfig;
use crate::retry::{retry, RetryConfig};

/// Source of raw result pages.
///
/// Any failure (connection error, non-success status, unreadable body) is
/// reported as an error; callers decide how to recover.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages with reqwest, spacing and retrying requests
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    throttle: Throttle,
    retry: RetryConfig,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            throttle: Throttle::new(Duration::from_millis(config.min_delay_ms)),
            retry: RetryConfig::network(config.retries),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        self.throttle.acquire().await;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .context("Request failed")?
            .error_for_status()?;

        response.text().await.context("Failed reading body")
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        retry(&self.retry, url, || self.fetch_once(url)).await
    }
}
