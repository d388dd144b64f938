//! Per-candidate enrichment
//!
//! Runs the summary fetch and the news search for one candidate concurrently
//! and merges them into an [`EnrichedRecord`]. Each step's failure is turned
//! into a default value plus an [`EnrichmentStep`] marker, so enrichment
//! itself cannot fail.

use crate::tier::Tier;
use crate::types::{
    Candidate, EnrichedRecord, EnrichmentStep, NewsFeed, NewsSource, PageSummary, SummarySource,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of the news step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsSignal {
    /// Number of feed items (the feed's own page size caps this)
    pub volume: u32,
    pub first_link: Option<String>,
}

impl From<&NewsFeed> for NewsSignal {
    fn from(feed: &NewsFeed) -> Self {
        Self {
            volume: u32::try_from(feed.items.len()).unwrap_or(u32::MAX),
            first_link: feed.first_link().map(str::to_string),
        }
    }
}

/// Stateless enricher shared by all concurrent enrichments
#[derive(Clone)]
pub struct Enricher {
    summaries: Arc<dyn SummarySource>,
    news: Arc<dyn NewsSource>,
    nationality_label: String,
}

impl Enricher {
    pub fn new(
        summaries: Arc<dyn SummarySource>,
        news: Arc<dyn NewsSource>,
        nationality_label: impl Into<String>,
    ) -> Self {
        Self {
            summaries,
            news,
            nationality_label: nationality_label.into(),
        }
    }

    /// News query for a figure: `"<name> <nationality> lifestyle"`
    pub fn news_query(&self, name: &str) -> String {
        format!("{} {} lifestyle", name, self.nationality_label)
    }

    /// Enrich and classify one candidate
    pub async fn enrich(&self, candidate: Candidate) -> EnrichedRecord {
        let query = self.news_query(&candidate.name);
        let (summary, news) = tokio::join!(
            self.summary_step(&candidate),
            self.news_step(&candidate.name, &query)
        );

        let mut degraded = Vec::new();
        let summary = summary.unwrap_or_else(|| {
            degraded.push(EnrichmentStep::Summary);
            PageSummary::default()
        });
        let news = news.unwrap_or_else(|| {
            degraded.push(EnrichmentStep::News);
            NewsSignal::default()
        });

        let mut source_links = Vec::with_capacity(2);
        source_links.extend(news.first_link);
        source_links.extend(summary.page_url);

        let mut record = EnrichedRecord {
            name: candidate.name,
            reference_title: candidate.reference_title,
            summary: summary.extract,
            news_volume: news.volume,
            source_links,
            tier: Tier::Minimalist,
            degraded,
        };
        record.tier = Tier::classify(record.news_volume);

        debug!(
            name = %record.name,
            news_volume = record.news_volume,
            tier = %record.tier,
            degraded = record.is_degraded(),
            "Candidate enriched"
        );

        record
    }

    async fn summary_step(&self, candidate: &Candidate) -> Option<PageSummary> {
        match self.summaries.fetch_summary(&candidate.reference_title).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(
                    name = %candidate.name,
                    source = self.summaries.name(),
                    error = %e,
                    "Summary step degraded"
                );
                None
            }
        }
    }

    async fn news_step(&self, name: &str, query: &str) -> Option<NewsSignal> {
        match self.news.search(query).await {
            Ok(feed) => Some(NewsSignal::from(&feed)),
            Err(e) => {
                warn!(
                    name = %name,
                    source = self.news.name(),
                    error = %e,
                    "News step degraded"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedItem, SourceError};
    use std::sync::Mutex;

    struct FixedSummary(Option<PageSummary>);

    #[async_trait::async_trait]
    impl SummarySource for FixedSummary {
        fn name(&self) -> &'static str {
            "FixedSummary"
        }

        async fn fetch_summary(&self, title: &str) -> Result<PageSummary, SourceError> {
            self.0
                .clone()
                .ok_or_else(|| SourceError::NotFound(title.to_string()))
        }
    }

    struct FixedNews {
        items: Option<usize>,
        queries: Mutex<Vec<String>>,
    }

    impl FixedNews {
        fn new(items: Option<usize>) -> Self {
            Self {
                items,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl NewsSource for FixedNews {
        fn name(&self) -> &'static str {
            "FixedNews"
        }

        async fn search(&self, query: &str) -> Result<NewsFeed, SourceError> {
            self.queries.lock().unwrap().push(query.to_string());
            let count = self
                .items
                .ok_or_else(|| SourceError::Network("connection refused".to_string()))?;
            Ok(NewsFeed {
                items: (0..count)
                    .map(|i| FeedItem {
                        title: Some(format!("Story {}", i)),
                        link: Some(format!("https://news.example/{}", i)),
                    })
                    .collect(),
            })
        }
    }

    fn full_summary() -> PageSummary {
        PageSummary {
            extract: Some("A famous singer.".to_string()),
            page_url: Some("https://en.wikipedia.org/wiki/Jane_Doe".to_string()),
        }
    }

    #[tokio::test]
    async fn test_both_steps_fail_yields_minimal_record() {
        let enricher = Enricher::new(
            Arc::new(FixedSummary(None)),
            Arc::new(FixedNews::new(None)),
            "Nigeria",
        );

        let record = enricher.enrich(Candidate::new("Jane Doe", "Jane_Doe")).await;

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.reference_title, "Jane_Doe");
        assert_eq!(record.summary, None);
        assert_eq!(record.news_volume, 0);
        assert!(record.source_links.is_empty());
        assert_eq!(record.tier, Tier::Minimalist);
        assert_eq!(
            record.degraded,
            vec![EnrichmentStep::Summary, EnrichmentStep::News]
        );
    }

    #[tokio::test]
    async fn test_successful_enrichment_orders_links_news_first() {
        let enricher = Enricher::new(
            Arc::new(FixedSummary(Some(full_summary()))),
            Arc::new(FixedNews::new(Some(7))),
            "Nigeria",
        );

        let record = enricher.enrich(Candidate::new("Jane Doe", "Jane_Doe")).await;

        assert_eq!(record.summary.as_deref(), Some("A famous singer."));
        assert_eq!(record.news_volume, 7);
        assert_eq!(record.tier, Tier::Elite);
        assert_eq!(
            record.source_links,
            vec![
                "https://news.example/0".to_string(),
                "https://en.wikipedia.org/wiki/Jane_Doe".to_string(),
            ]
        );
        assert!(!record.is_degraded());
    }

    #[tokio::test]
    async fn test_news_failure_keeps_summary_link() {
        let enricher = Enricher::new(
            Arc::new(FixedSummary(Some(full_summary()))),
            Arc::new(FixedNews::new(None)),
            "Nigeria",
        );

        let record = enricher.enrich(Candidate::new("Jane Doe", "Jane_Doe")).await;

        assert_eq!(record.news_volume, 0);
        assert_eq!(record.tier, Tier::Minimalist);
        assert_eq!(
            record.source_links,
            vec!["https://en.wikipedia.org/wiki/Jane_Doe".to_string()]
        );
        assert_eq!(record.degraded, vec![EnrichmentStep::News]);
    }

    #[tokio::test]
    async fn test_empty_feed_is_not_degraded() {
        let enricher = Enricher::new(
            Arc::new(FixedSummary(Some(PageSummary::default()))),
            Arc::new(FixedNews::new(Some(0))),
            "Nigeria",
        );

        let record = enricher.enrich(Candidate::new("Quiet Person", "Quiet_Person")).await;

        assert_eq!(record.tier, Tier::Minimalist);
        assert!(record.source_links.is_empty());
        assert!(!record.is_degraded());
    }

    #[tokio::test]
    async fn test_news_query_includes_nationality() {
        let news = Arc::new(FixedNews::new(Some(2)));
        let enricher = Enricher::new(Arc::new(FixedSummary(None)), news.clone(), "Nigeria");

        let record = enricher.enrich(Candidate::new("Wizkid", "Wizkid")).await;

        assert_eq!(record.tier, Tier::Casual);
        assert_eq!(
            news.queries.lock().unwrap().as_slice(),
            ["Wizkid Nigeria lifestyle".to_string()]
        );
    }
}
