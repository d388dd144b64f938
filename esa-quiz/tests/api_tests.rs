//! HTTP API integration tests
//!
//! Drive the router with in-process source fakes; nothing touches the network.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use esa_quiz::aggregator::Aggregator;
use esa_quiz::config::PipelineConfig;
use esa_quiz::enricher::Enricher;
use esa_quiz::types::{
    Candidate, CandidateSource, FeedItem, NewsFeed, NewsSource, PageSummary, SourceError,
    SummarySource,
};
use esa_quiz::{build_router, AppState};

// ============================================================================
// Fakes
// ============================================================================

struct FixedCandidates(Vec<Candidate>);

#[async_trait::async_trait]
impl CandidateSource for FixedCandidates {
    fn name(&self) -> &'static str {
        "Fixed"
    }

    async fn discover(&self, limit: usize) -> Result<Vec<Candidate>, SourceError> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

struct UnreachableCandidates;

#[async_trait::async_trait]
impl CandidateSource for UnreachableCandidates {
    fn name(&self) -> &'static str {
        "Unreachable"
    }

    async fn discover(&self, _limit: usize) -> Result<Vec<Candidate>, SourceError> {
        Err(SourceError::Api(503, "query service overloaded".to_string()))
    }
}

/// Summaries by page title; unknown titles are not found
struct MapSummaries(HashMap<&'static str, &'static str>);

#[async_trait::async_trait]
impl SummarySource for MapSummaries {
    fn name(&self) -> &'static str {
        "MapSummaries"
    }

    async fn fetch_summary(&self, title: &str) -> Result<PageSummary, SourceError> {
        match self.0.get(title) {
            Some(extract) => Ok(PageSummary {
                extract: Some(extract.to_string()),
                page_url: Some(format!("https://en.wikipedia.org/wiki/{}", title)),
            }),
            None => Err(SourceError::NotFound(title.to_string())),
        }
    }
}

/// Feed volume keyed by the figure named at the start of the query
struct VolumeNews(HashMap<&'static str, usize>);

#[async_trait::async_trait]
impl NewsSource for VolumeNews {
    fn name(&self) -> &'static str {
        "VolumeNews"
    }

    async fn search(&self, query: &str) -> Result<NewsFeed, SourceError> {
        let volume = self
            .0
            .iter()
            .find(|(name, _)| query.starts_with(*name))
            .map(|(_, volume)| *volume)
            .unwrap_or(3);

        Ok(NewsFeed {
            items: (0..volume)
                .map(|i| FeedItem {
                    title: Some(format!("{} story {}", query, i)),
                    link: Some(format!("https://news.example/{}/{}", query.len(), i)),
                })
                .collect(),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn state_with(candidates: Arc<dyn CandidateSource>) -> AppState {
    let summaries = Arc::new(MapSummaries(HashMap::from([(
        "Ada_Star",
        "Singer & <b>actor</b>.",
    )])));
    let news: Arc<dyn NewsSource> = Arc::new(VolumeNews(HashMap::from([
        ("Ada Star", 8),
        ("Bola Rise", 4),
        ("Chi Calm", 0),
    ])));

    let enricher = Enricher::new(summaries, news.clone(), "Nigeria");
    let aggregator = Aggregator::new(candidates, enricher, 64, 4);
    AppState::new(aggregator, news, PipelineConfig::default())
}

fn test_app_state() -> AppState {
    state_with(Arc::new(FixedCandidates(vec![
        Candidate::new("Chi Calm", "Chi_Calm"),
        Candidate::new("Bola Rise", "Bola_Rise"),
        Candidate::new("Ada Star", "Ada_Star"),
    ])))
}

fn submission(score: i64, weight: i64) -> Value {
    json!({
        "email": "someone@example.com",
        "answers": { "travel": weight, "dining": weight },
        "score": score,
        "timestamp": "2024-05-01T10:00:00Z",
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_module_and_version() {
    let app = build_router(test_app_state());

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "esa-quiz");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["uptime_seconds"].is_u64());
    assert!(json.get("last_error").is_none());
}

// ============================================================================
// Submit
// ============================================================================

#[tokio::test]
async fn submit_matches_figure_in_resolved_tier() {
    let app = build_router(test_app_state());

    let (status, json) = post_json(app, "/api/quiz/submit", submission(60, 4)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "Social Elite");
    assert_eq!(json["celebrity"], "Ada Star");

    let description = json["description"].as_str().unwrap();
    assert!(description.contains("much like Ada Star."));
    assert!(description.contains("About Ada Star: Singer &amp; &lt;b&gt;actor&lt;/b&gt;."));

    let sources = json["details"]["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert!(sources[0].as_str().unwrap().starts_with("https://news.example/"));
    assert_eq!(sources[1], "https://en.wikipedia.org/wiki/Ada_Star");
    assert_eq!(json["details"]["summary"], "Singer & <b>actor</b>.");
}

#[tokio::test]
async fn submit_without_summary_omits_about_block() {
    let app = build_router(test_app_state());

    let (status, json) = post_json(app, "/api/quiz/submit", submission(45, 3)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "Aspiring Sophisticate");
    assert_eq!(json["celebrity"], "Bola Rise");
    assert!(!json["description"].as_str().unwrap().contains("About"));
    assert!(json["details"].get("summary").is_none());
    assert_eq!(json["details"]["sources"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_falls_back_to_first_figure_when_tier_is_empty() {
    let app = build_router(test_app_state());

    // Casual tier has no figure; the first (highest-tier) record is used
    let (status, json) = post_json(app, "/api/quiz/submit", submission(30, 2)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "Casual Consumer");
    assert_eq!(json["celebrity"], "Ada Star");
    assert!(json["description"]
        .as_str()
        .unwrap()
        .starts_with("<strong>Balanced pragmatism.</strong> Like Ada Star,"));
}

#[tokio::test]
async fn submit_source_failure_is_bad_gateway() {
    let state = state_with(Arc::new(UnreachableCandidates));
    let app = build_router(state.clone());

    let (status, json) = post_json(app, "/api/quiz/submit", submission(60, 4)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "SOURCE_UNAVAILABLE");
    assert!(json.get("description").is_none());

    // Failure is surfaced through health diagnostics
    let (_, health) = get_json(build_router(state), "/health").await;
    assert!(health["last_error"]
        .as_str()
        .unwrap()
        .contains("query service overloaded"));
}

#[tokio::test]
async fn submit_with_no_candidates_is_service_unavailable() {
    let app = build_router(state_with(Arc::new(FixedCandidates(vec![]))));

    let (status, json) = post_json(app, "/api/quiz/submit", submission(20, 1)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "NO_CANDIDATES");
}

#[tokio::test]
async fn submit_rejects_out_of_range_weight() {
    let app = build_router(test_app_state());

    let (status, json) = post_json(app, "/api/quiz/submit", submission(60, 7)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

// ============================================================================
// Questions
// ============================================================================

#[tokio::test]
async fn questions_returns_full_bank() {
    let app = build_router(test_app_state());

    let (status, json) = get_json(app, "/api/quiz/questions").await;

    assert_eq!(status, StatusCode::OK);
    let questions = json.as_array().unwrap();
    assert_eq!(questions.len(), 16);
    for question in questions {
        let values: Vec<u64> = question["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["value"].as_u64().unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}

#[tokio::test]
async fn questions_order_is_stable_for_same_headlines() {
    let state = test_app_state();

    let (_, first) = get_json(build_router(state.clone()), "/api/quiz/questions").await;
    let (_, second) = get_json(build_router(state), "/api/quiz/questions").await;

    let ids = |json: &Value| -> Vec<String> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
}
