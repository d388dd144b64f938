//! Wikidata knowledge graph client
//!
//! Discovers candidate figures with a single SPARQL query: humans
//! (`wdt:P31 wd:Q5`) whose country of citizenship (`wdt:P27`) is the
//! configured nationality and who have an English Wikipedia article.
//!
//! # API Reference
//! - Endpoint: https://query.wikidata.org/sparql
//! - Response: SPARQL 1.1 JSON results (`results.bindings[*]`)

use super::{build_http_client, check_status};
use crate::config::SourcesConfig;
use crate::types::{Candidate, CandidateSource, SourceError};
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Wikidata SPARQL client
pub struct WikidataClient {
    http_client: Client,
    endpoint: String,
    nationality_qid: String,
}

impl WikidataClient {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: build_http_client(config)?,
            endpoint: config.knowledge_graph_url.clone(),
            nationality_qid: config.nationality_qid.clone(),
        })
    }
}

#[async_trait::async_trait]
impl CandidateSource for WikidataClient {
    fn name(&self) -> &'static str {
        "Wikidata"
    }

    async fn discover(&self, limit: usize) -> Result<Vec<Candidate>, SourceError> {
        let query = sparql_query(&self.nationality_qid, limit);

        debug!(endpoint = %self.endpoint, limit, "Querying Wikidata SPARQL endpoint");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("query", query.as_str())])
            .header(header::ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Wikidata request failed: {}", e)))?;

        let response = check_status(response, "Wikidata SPARQL endpoint").await?;

        let body: SparqlResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Wikidata response: {}", e)))?;

        let candidates = candidates_from_response(body)?;

        debug!(count = candidates.len(), "Wikidata discovery complete");

        Ok(candidates)
    }
}

/// Build the candidate SPARQL query
pub fn sparql_query(nationality_qid: &str, limit: usize) -> String {
    format!(
        r#"SELECT ?person ?personLabel ?enTitle WHERE {{
  ?person wdt:P31 wd:Q5 .
  ?person wdt:P27 wd:{qid} .
  ?sitelink schema:about ?person ; schema:isPartOf <https://en.wikipedia.org/> ; schema:name ?enTitle .
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}
LIMIT {limit}"#,
        qid = nationality_qid,
        limit = limit
    )
}

/// Convert SPARQL bindings into candidates
///
/// Bindings missing a label or title are skipped. Names are deduplicated with
/// the first occurrence kept; engine order is otherwise preserved.
pub fn candidates_from_response(body: SparqlResponse) -> Result<Vec<Candidate>, SourceError> {
    let results = body
        .results
        .ok_or_else(|| SourceError::Parse("SPARQL response has no results".to_string()))?;

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for binding in results.bindings {
        let (Some(label), Some(title)) = (binding.person_label, binding.en_title) else {
            continue;
        };
        if label.value.is_empty() || title.value.is_empty() {
            continue;
        }
        if seen.insert(label.value.clone()) {
            candidates.push(Candidate::new(label.value, title.value));
        }
    }

    Ok(candidates)
}

// ============================================================================
// SPARQL Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    results: Option<SparqlResults>,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Deserialize)]
struct SparqlBinding {
    #[serde(rename = "personLabel")]
    person_label: Option<SparqlValue>,
    #[serde(rename = "enTitle")]
    en_title: Option<SparqlValue>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}
