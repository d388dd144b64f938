//! Error types for esa-quiz
//!
//! Only two failures cross the pipeline boundary: the knowledge graph being
//! unavailable and an empty candidate list. Per-candidate degradation is data
//! (see [`crate::types::EnrichmentStep`]), never an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Pipeline boundary failure
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Candidate discovery failed; nothing could be aggregated
    #[error("Candidate source unavailable: {0}")]
    SourceUnavailable(String),

    /// Aggregation produced no candidates to resolve against
    #[error("No candidates available")]
    NoCandidates,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream knowledge graph failed (502)
    #[error("Candidate source unavailable: {0}")]
    SourceUnavailable(String),

    /// Nothing to match against (503)
    #[error("No candidates available")]
    NoCandidates,

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// esa-common error
    #[error("Common error: {0}")]
    Common(#[from] esa_common::Error),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::SourceUnavailable(msg) => ApiError::SourceUnavailable(msg),
            PipelineError::NoCandidates => ApiError::NoCandidates,
        }
    }
}

impl ApiError {
    /// HTTP status and stable error code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::SourceUnavailable(_) => (StatusCode::BAD_GATEWAY, "SOURCE_UNAVAILABLE"),
            ApiError::NoCandidates => (StatusCode::SERVICE_UNAVAILABLE, "NO_CANDIDATES"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
