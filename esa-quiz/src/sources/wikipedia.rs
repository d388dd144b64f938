//! Wikipedia REST page summary client
//!
//! GET `<summary_base_url>/<title>` returns JSON with an optional `extract`
//! and `content_urls.desktop.page`. Any non-2xx status is a failure.

use super::{build_http_client, build_rate_limiter, check_status};
use crate::config::SourcesConfig;
use crate::types::{PageSummary, SourceError, SummarySource};
use governor::DefaultDirectRateLimiter;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Wikipedia summary client
pub struct WikipediaClient {
    http_client: Client,
    base_url: String,
    rate_limiter: DefaultDirectRateLimiter,
}

impl WikipediaClient {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: build_http_client(config)?,
            base_url: config.summary_base_url.trim_end_matches('/').to_string(),
            rate_limiter: build_rate_limiter(config.requests_per_second),
        })
    }

    /// Summary URL for a page title (title is percent-encoded)
    pub fn summary_url(&self, title: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(title))
    }
}

#[async_trait::async_trait]
impl SummarySource for WikipediaClient {
    fn name(&self) -> &'static str {
        "Wikipedia"
    }

    async fn fetch_summary(&self, title: &str) -> Result<PageSummary, SourceError> {
        self.rate_limiter.until_ready().await;

        let url = self.summary_url(title);
        debug!(title = %title, url = %url, "Fetching Wikipedia summary");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Wikipedia request failed: {}", e)))?;

        let response = check_status(response, title).await?;

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Wikipedia summary: {}", e)))?;

        Ok(body.into())
    }
}

// ============================================================================
// Wikipedia Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PlatformUrls>,
}

#[derive(Debug, Deserialize)]
struct PlatformUrls {
    page: Option<String>,
}

impl From<SummaryResponse> for PageSummary {
    fn from(body: SummaryResponse) -> Self {
        let extract = body.extract.filter(|e| !e.trim().is_empty());
        let page_url = body
            .content_urls
            .and_then(|urls| urls.desktop)
            .and_then(|desktop| desktop.page)
            .filter(|page| !page.is_empty());

        PageSummary { extract, page_url }
    }
}
