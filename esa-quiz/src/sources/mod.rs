//! Outbound source clients
//!
//! One HTTP client per external service:
//! 1. **wikidata** - SPARQL knowledge graph → candidate figures
//! 2. **wikipedia** - REST page summary → extract + canonical URL
//! 3. **news** - RSS search feed → item count + first link
//!
//! Each implements the matching trait from [`crate::types`]. Clients never
//! retry; failures are returned as [`SourceError`] and the caller decides
//! whether they are fatal.

pub mod news;
pub mod wikidata;
pub mod wikipedia;

pub use news::NewsFeedClient;
pub use wikidata::WikidataClient;
pub use wikipedia::WikipediaClient;

use crate::config::SourcesConfig;
use crate::types::SourceError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Response, StatusCode};
use std::num::NonZeroU32;

/// Build an HTTP client with the configured user agent and per-call timeout
pub(crate) fn build_http_client(config: &SourcesConfig) -> Result<Client, SourceError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))
}

/// Direct (unkeyed) limiter allowing `per_second` requests per second
pub(crate) fn build_rate_limiter(per_second: u32) -> DefaultDirectRateLimiter {
    let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
    RateLimiter::direct(quota)
}

/// Map non-success statuses to [`SourceError`]
pub(crate) async fn check_status(response: Response, what: &str) -> Result<Response, SourceError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(what.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(SourceError::Api(status.as_u16(), truncate(&body, 200)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 200), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "₦".repeat(10);
        assert_eq!(truncate(&text, 3), "₦₦₦…");
    }

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(build_http_client(&SourcesConfig::default()).is_ok());
    }

    #[test]
    fn test_rate_limiter_allows_first_request() {
        let limiter = build_rate_limiter(2);
        assert!(limiter.check().is_ok());
    }
}
