//! Axum route handlers for the analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::pipeline::{run_analysis, AnalysisInput};
use crate::errors::AppError;
use crate::extraction::{ResumeDocument, ResumeFormat};
use crate::models::Report;
use crate::state::AppState;
use crate::storage;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: Report,
    pub report_url: String,
}

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<(String, Bytes)>,
    jd_text: String,
    target_location: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart form: `resume` (file), `jd_text` (text), optional `target_location`.
/// Runs the full pipeline, writes the report, and returns it with a download URL.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart).await?;

    let (filename, bytes) = form
        .resume
        .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    let jd_text = form.jd_text.trim();
    if jd_text.is_empty() {
        return Err(AppError::Validation(
            "Job Description is required".to_string(),
        ));
    }
    let format = ResumeFormat::from_filename(&filename)?;

    let request_id = storage::request_id();
    let saved = storage::save_upload(&state.config.upload_dir, &request_id, &filename, &bytes)
        .await?;
    info!(request_id = %request_id, path = %saved.display(), "Resume upload stored");

    let input = AnalysisInput {
        resume: ResumeDocument { bytes, format },
        jd_text: jd_text.to_string(),
        target_location: form.target_location,
    };
    let report = run_analysis(state.extractor.as_ref(), &state.fetcher, &input).await?;

    let report_filename = storage::report_filename(&request_id);
    let report_path = state.config.report_dir.join(&report_filename);
    state.renderer.render(&report, &report_path).await?;
    info!(request_id = %request_id, score = report.match_score, "Report generated");

    Ok(Json(AnalyzeResponse {
        success: true,
        data: report,
        report_url: format!("/api/download/{report_filename}"),
    }))
}

/// GET /api/download/:filename
///
/// Streams a previously generated report as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = storage::resolve_report(&state.config.report_dir, &filename)?;
    let body = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(filename.clone()))?;

    let headers = [
        (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, body))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                form.resume = Some((filename, bytes));
            }
            "jd_text" => {
                form.jd_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read jd_text: {e}")))?;
            }
            "target_location" => {
                let location = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read target_location: {e}"))
                })?;
                let location = location.trim();
                if !location.is_empty() {
                    form.target_location = Some(location.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
