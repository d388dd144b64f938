//! Core types and source traits for the celebrity pipeline
//!
//! # Architecture
//! - **Candidate source:** knowledge graph query → [`Candidate`] list
//! - **Enrichment sources:** encyclopedia summary + news feed per candidate
//! - **Output:** [`EnrichedRecord`] with a popularity [`Tier`]
//!
//! Sources sit behind async traits so the pipeline can be driven by HTTP
//! clients in production and by in-process fakes in tests.

use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Pipeline Data
// ============================================================================

/// Public figure discovered in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Display label (unique within a discovery result)
    pub name: String,
    /// English encyclopedia page title
    pub reference_title: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, reference_title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference_title: reference_title.into(),
        }
    }
}

/// Enrichment step that can degrade without failing the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStep {
    /// Encyclopedia summary fetch
    Summary,
    /// News feed volume fetch
    News,
}

/// Candidate after enrichment and classification
///
/// A record whose steps all degraded is still valid: no summary,
/// `news_volume == 0`, no source links, tier `Minimalist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub name: String,
    pub reference_title: String,
    /// Free-text summary from the encyclopedia, if one could be fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Number of news items returned for the figure
    pub news_volume: u32,
    /// First news link (if any), then the canonical encyclopedia page (if any)
    pub source_links: Vec<String>,
    pub tier: Tier,
    /// Steps that failed and were replaced by defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<EnrichmentStep>,
}

impl EnrichedRecord {
    /// True if any enrichment step fell back to its default
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Encyclopedia page summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    /// Free-text extract (absent or empty extracts are `None`)
    pub extract: Option<String>,
    /// Canonical desktop page URL
    pub page_url: Option<String>,
}

/// One item of a syndication feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
}

/// Parsed syndication feed (items in document order)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFeed {
    pub items: Vec<FeedItem>,
}

impl NewsFeed {
    /// Link of the first item, if it has one
    pub fn first_link(&self) -> Option<&str> {
        self.items
            .first()
            .and_then(|item| item.link.as_deref())
            .filter(|link| !link.is_empty())
    }
}

// ============================================================================
// Source Traits
// ============================================================================

/// Knowledge graph query for candidate figures
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &'static str;

    /// Discover up to `limit` candidates, deduplicated by name (first wins)
    async fn discover(&self, limit: usize) -> Result<Vec<Candidate>, SourceError>;
}

/// Encyclopedia summary lookup by page title
#[async_trait::async_trait]
pub trait SummarySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_summary(&self, title: &str) -> Result<PageSummary, SourceError>;
}

/// Free-text news feed search
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<NewsFeed, SourceError>;
}

/// Outbound source error
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network communication error (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Resource does not exist at the source
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response body
    #[error("Parse error: {0}")]
    Parse(String),
}
