use crate::errors::{fetch_context, with_fetch_context, with_parse_context};
use crate::rate_limiter::RateLimiter;
use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        debug!("GET {}", url);
        self.send_get_request(url).await
    }

    /// GET `url` and decode the body as JSON, failing on any non-2xx status.
    pub async fn get_json(&mut self, url: &str) -> Result<Value> {
        let response = self.get(url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            bail!("{}: not found (404)", fetch_context(url));
        }
        if !status.is_success() {
            bail!("{}: API returned status {}", fetch_context(url), status);
        }

        let text = with_fetch_context(response.text().await, url)?;
        with_parse_context(serde_json::from_str(&text), "JSON response")
    }

    pub fn requests_sent(&self) -> usize {
        self.rate_limiter.request_count()
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        with_fetch_context(self.client.get(url).send().await, url)
    }
}
