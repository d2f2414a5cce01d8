use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level error type. Every variant is fatal to the analysis request.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Recommendation-source failures are deliberately absent: they are modelled by
/// `recommendations::ProviderError` and never leave the fetcher.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Document conversion failed: {0}")]
    Conversion(String),

    #[error("Report generation failed: {0}")]
    ReportGeneration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Extraction(_)
            | AppError::Conversion(_)
            | AppError::ReportGeneration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other if status.is_server_error() => {
                tracing::error!("{other}");
                other.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::Validation("No resume file uploaded".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No resume file uploaded");
    }

    #[test]
    fn test_unsupported_format_maps_to_bad_request() {
        let err = AppError::UnsupportedFormat("bad".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pipeline_failures_map_to_server_error() {
        for err in [
            AppError::Extraction("x".to_string()),
            AppError::Conversion("x".to_string()),
            AppError::ReportGeneration("x".to_string()),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound("report.html".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
