//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::analysis::AnalysisError;
use crate::service::extraction::ExtractionError;
use crate::service::report::ReportError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The document is readable but cannot be analyzed (422).
    /// Carries the specific empty-claims diagnosis, never a generic failure.
    #[error("Unanalyzable document: {0}")]
    UnanalyzableDocument(String),

    /// Extraction backend not configured (503)
    #[error("Analysis unavailable: {0}")]
    NotConfigured(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// External service error (502)
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnanalyzableDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnanalyzableDocument(_) => "unanalyzable_document",
            ApiError::NotConfigured(_) => "not_configured",
            ApiError::Internal(_) => "internal_error",
            ApiError::ExternalService(_) => "external_service_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Extraction(ExtractionError::EmptyDocument(diagnosis)) => {
                ApiError::UnanalyzableDocument(diagnosis.to_string())
            }
            AnalysisError::Extraction(ExtractionError::NotConfigured) => {
                ApiError::NotConfigured("claim extraction backend is not configured".to_string())
            }
            AnalysisError::Extraction(ExtractionError::LlmFailed(msg)) => {
                ApiError::ExternalService(msg)
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::UnsupportedFormat(fmt) => ApiError::BadRequest(format!(
                "unsupported report format '{}', expected html|json|csv|checklist",
                fmt
            )),
            ReportError::Serialization(msg) => ApiError::Internal(msg),
        }
    }
}
