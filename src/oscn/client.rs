// src/oscn/client.rs
use crate::batch::DocketSource;
use crate::oscn::models::{CaseQuery, OSCN_DOCKET_URL};
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

// The docket host rejects requests without a browser-like User-Agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
// Pause before every request so a long batch does not hammer the host.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub request_delay: Duration,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            base_url: OSCN_DOCKET_URL.to_string(),
        }
    }
}

/// Fetches raw docket markup. Never looks at the content.
pub struct OscnClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OscnClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the docket page for `query`.
    pub async fn fetch_docket(&self, query: &CaseQuery) -> Result<String, FetchError> {
        let url = query.docket_url(&self.config.base_url);
        tracing::debug!("Downloading docket from: {} (User-Agent: {})", url, self.config.user_agent);

        tokio::time::sleep(self.config.request_delay).await;

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and request rate.");
                return Err(FetchError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(FetchError::NotFound(url));
            }
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

impl DocketSource for OscnClient {
    fn locator(&self, query: &CaseQuery) -> String {
        query.docket_url(&self.config.base_url)
    }

    async fn fetch(&self, query: &CaseQuery) -> Result<String, FetchError> {
        self.fetch_docket(query).await
    }
}
