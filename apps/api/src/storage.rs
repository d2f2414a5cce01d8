//! File naming for uploads and generated reports.
//!
//! Concurrent requests may upload files with the same name, so every stored file
//! carries a per-request random identifier.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::errors::AppError;

const REPORT_PREFIX: &str = "ATS_Report_";
const REPORT_EXTENSION: &str = "html";

/// Eight random hex characters identifying one analysis request.
pub fn request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; strips any directory part.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

pub fn report_filename(request_id: &str) -> String {
    format!("{REPORT_PREFIX}{request_id}.{REPORT_EXTENSION}")
}

/// Writes the raw upload as `<request_id>_<sanitized name>` under `dir`.
pub async fn save_upload(
    dir: &Path,
    request_id: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating upload directory {}", dir.display()))?;
    let path = dir.join(format!("{request_id}_{}", sanitize_filename(filename)));
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("writing upload {}", path.display()))?;
    Ok(path)
}

/// Resolves a download name inside `dir`, refusing anything that could escape it.
pub fn resolve_report(dir: &Path, filename: &str) -> Result<PathBuf, AppError> {
    let is_plain = !filename.is_empty()
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
        && filename == sanitize_filename(filename);
    if !is_plain {
        return Err(AppError::NotFound(filename.to_string()));
    }
    Ok(dir.join(filename))
}
