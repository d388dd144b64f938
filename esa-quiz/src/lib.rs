//! esa-quiz library interface
//!
//! Celebrity tier matching: a knowledge-graph query discovers public figures,
//! each figure is enriched with an encyclopedia summary and news volume,
//! classified into a popularity tier, and matched against a quiz score.

pub mod aggregator;
pub mod api;
pub mod composer;
pub mod config;
pub mod enricher;
pub mod error;
pub mod questions;
pub mod scoring;
pub mod sources;
pub mod tier;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use aggregator::Aggregator;
use axum::Router;
use chrono::{DateTime, Utc};
use config::{PipelineConfig, QuizConfig};
use enricher::Enricher;
use sources::{NewsFeedClient, WikidataClient, WikipediaClient};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use types::{NewsSource, SourceError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    /// Feed source for the question-order headlines
    pub news: Arc<dyn NewsSource>,
    pub pipeline: Arc<PipelineConfig>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last pipeline failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(
        aggregator: Aggregator,
        news: Arc<dyn NewsSource>,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            news,
            pipeline: Arc::new(pipeline),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Wire the HTTP source clients described by `config`
    ///
    /// The news client is shared by enrichment and the question headlines.
    pub fn from_config(config: &QuizConfig) -> Result<Self, SourceError> {
        let candidates = Arc::new(WikidataClient::new(&config.sources)?);
        let summaries = Arc::new(WikipediaClient::new(&config.sources)?);
        let news: Arc<dyn NewsSource> = Arc::new(NewsFeedClient::new(&config.sources)?);

        let enricher = Enricher::new(
            summaries,
            news.clone(),
            config.sources.nationality_label.clone(),
        );
        let aggregator = Aggregator::new(
            candidates,
            enricher,
            config.pipeline.max_candidates,
            config.pipeline.max_concurrency,
        );

        Ok(Self::new(aggregator, news, config.pipeline.clone()))
    }

    pub async fn record_error(&self, message: String) {
        *self.last_error.write().await = Some(message);
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::quiz_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
