//! Configuration for esa-quiz
//!
//! Loaded from `esa-quiz.toml` (see [`esa_common::config`] for file
//! resolution). Every field has a built-in default, so an empty or missing
//! file yields a working configuration. CLI/ENV values override the file.
//!
//! Tier thresholds are deliberately absent: they are constants in
//! [`crate::tier`] and [`crate::scoring`].

use esa_common::config::LoggingConfig;
use esa_common::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Complete esa-quiz configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// HTTP listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            logging: LoggingConfig::default(),
            sources: SourcesConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Apply command-line / environment overrides on top of file values
    pub fn with_overrides(mut self, bind: Option<String>, log_level: Option<String>) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.submit_limit == 0 {
            return Err(Error::Config("pipeline.submit_limit must be > 0".to_string()));
        }
        if self.pipeline.max_candidates == 0 {
            return Err(Error::Config("pipeline.max_candidates must be > 0".to_string()));
        }
        if self.pipeline.max_concurrency == 0 {
            return Err(Error::Config("pipeline.max_concurrency must be > 0".to_string()));
        }
        if self.sources.requests_per_second == 0 {
            return Err(Error::Config("sources.requests_per_second must be > 0".to_string()));
        }
        if self.sources.request_timeout_secs == 0 {
            return Err(Error::Config("sources.request_timeout_secs must be > 0".to_string()));
        }
        if !is_entity_id(&self.sources.nationality_qid) {
            return Err(Error::Config(format!(
                "sources.nationality_qid is not a Wikidata item id: {}",
                self.sources.nationality_qid
            )));
        }
        Ok(())
    }
}

/// Outbound source settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// SPARQL endpoint of the knowledge graph
    pub knowledge_graph_url: String,
    /// Encyclopedia REST summary base URL (page title is appended)
    pub summary_base_url: String,
    /// News feed search URL
    pub news_feed_url: String,
    /// Wikidata item id of the target nationality
    pub nationality_qid: String,
    /// Nationality name used in news queries
    pub nationality_label: String,
    pub news_locale: NewsLocale,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Outbound request quota for each per-candidate source client
    pub requests_per_second: u32,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            knowledge_graph_url: "https://query.wikidata.org/sparql".to_string(),
            summary_base_url: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            news_feed_url: "https://news.google.com/rss/search".to_string(),
            nationality_qid: "Q1033".to_string(),
            nationality_label: "Nigeria".to_string(),
            news_locale: NewsLocale::default(),
            user_agent: format!(
                "esa-quiz/{} (celebrity tier matching)",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout_secs: 10,
            requests_per_second: 10,
        }
    }
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Locale parameters appended to news feed searches
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewsLocale {
    pub hl: String,
    pub gl: String,
    pub ceid: String,
}

impl Default for NewsLocale {
    fn default() -> Self {
        Self {
            hl: "en-NG".to_string(),
            gl: "NG".to_string(),
            ceid: "NG:en".to_string(),
        }
    }
}

/// Aggregation and question-set settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Candidate limit used for each scoring request
    pub submit_limit: usize,
    /// Upper bound applied to any requested candidate limit
    pub max_candidates: usize,
    /// Maximum enrichments in flight at once
    pub max_concurrency: usize,
    /// Feed queries whose headlines seed the question order
    pub headline_queries: Vec<String>,
    /// Headlines taken from each feed
    pub headlines_per_feed: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            submit_limit: 28,
            max_candidates: 64,
            max_concurrency: 8,
            headline_queries: vec![
                "Nigerian celebrity lifestyle".to_string(),
                "Nigerian luxury brands".to_string(),
            ],
            headlines_per_feed: 6,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5730".to_string()
}

/// `Q` followed by digits, e.g. `Q1033`
fn is_entity_id(id: &str) -> bool {
    id.strip_prefix('Q')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
