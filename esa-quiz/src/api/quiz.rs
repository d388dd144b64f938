//! Quiz API handlers
//!
//! - `GET /api/quiz/questions` serves the headline-ordered question set
//! - `POST /api/quiz/submit` resolves the user's tier and matches a figure

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::{
    composer::compose,
    error::{ApiError, ApiResult},
    questions::{produce_questions, Question},
    scoring::{resolve_tier, select_representative},
    AppState,
};

/// Lowest accepted answer weight
pub const MIN_ANSWER_WEIGHT: i64 = 1;
/// Highest accepted answer weight
pub const MAX_ANSWER_WEIGHT: i64 = 4;

/// Quiz submission
///
/// `email` is accepted for the caller's record keeping and is never logged.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub email: String,
    /// Question id → chosen option weight
    pub answers: BTreeMap<String, i64>,
    /// Sum of the answer weights as computed by the client
    pub score: i64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDetails {
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Tier match for a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// Display label of the resolved tier
    #[serde(rename = "type")]
    pub tier_label: String,
    pub celebrity: String,
    /// HTML narrative
    pub description: String,
    pub details: SubmissionDetails,
}

fn validate_answers(answers: &BTreeMap<String, i64>) -> ApiResult<()> {
    for (question_id, weight) in answers {
        if !(MIN_ANSWER_WEIGHT..=MAX_ANSWER_WEIGHT).contains(weight) {
            return Err(ApiError::BadRequest(format!(
                "answer weight for '{}' must be {}..={}, got {}",
                question_id, MIN_ANSWER_WEIGHT, MAX_ANSWER_WEIGHT, weight
            )));
        }
    }
    Ok(())
}

/// POST /api/quiz/submit
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(request): Json<SubmissionRequest>,
) -> ApiResult<Json<SubmissionResponse>> {
    validate_answers(&request.answers)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("submission", %request_id);

    async move {
        let tier = resolve_tier(request.score);
        info!(
            score = request.score,
            answers = request.answers.len(),
            tier = %tier,
            "Quiz submission received"
        );

        let results = match state.aggregator.aggregate(state.pipeline.submit_limit).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Aggregation failed");
                state.record_error(e.to_string()).await;
                return Err(e.into());
            }
        };

        let representative = match select_representative(tier, &results) {
            Ok(rep) => rep,
            Err(e) => {
                error!(error = %e, "No representative available");
                state.record_error(e.to_string()).await;
                return Err(e.into());
            }
        };
        let record = representative.record;

        info!(
            celebrity = %record.name,
            matched = representative.matched,
            "Representative selected"
        );

        Ok(Json(SubmissionResponse {
            tier_label: tier.display_label().to_string(),
            celebrity: record.name.clone(),
            description: compose(tier, &record.name, record.summary.as_deref()),
            details: SubmissionDetails {
                sources: record.source_links.clone(),
                summary: record.summary.clone(),
            },
        }))
    }
    .instrument(span)
    .await
}

/// GET /api/quiz/questions
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    let questions = produce_questions(
        state.news.as_ref(),
        &state.pipeline.headline_queries,
        state.pipeline.headlines_per_feed,
    )
    .await;

    Json(questions)
}

/// Build quiz routes
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/questions", get(list_questions))
        .route("/api/quiz/submit", post(submit_quiz))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_answers_accepts_weight_range() {
        let answers: BTreeMap<String, i64> = [("travel", 1), ("dining", 4), ("taste", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert!(validate_answers(&answers).is_ok());
        assert!(validate_answers(&BTreeMap::new()).is_ok());
    }

    #[test]
    fn test_validate_answers_rejects_out_of_range() {
        for weight in [0, 5, -1] {
            let mut answers = BTreeMap::new();
            answers.insert("travel".to_string(), weight);
            assert!(matches!(
                validate_answers(&answers),
                Err(ApiError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_response_uses_type_key() {
        let response = SubmissionResponse {
            tier_label: "Social Elite".to_string(),
            celebrity: "Jane Doe".to_string(),
            description: "text".to_string(),
            details: SubmissionDetails {
                sources: vec![],
                summary: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "Social Elite");
        assert!(json["details"].get("summary").is_none());
    }
}
