//! Resume document handling: accepted formats and conversion to plain text.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file format. Accepted: .pdf, .doc, .docx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeFormat {
    Pdf,
    Doc,
    Docx,
}

impl ResumeFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(ResumeFormat::Pdf),
            Some("doc") => Ok(ResumeFormat::Doc),
            Some("docx") => Ok(ResumeFormat::Docx),
            _ => Err(AppError::UnsupportedFormat(
                UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            )),
        }
    }

    /// Dotted extension, as recorded in `ResumeProfile::file_format`.
    pub fn extension(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => ".pdf",
            ResumeFormat::Doc => ".doc",
            ResumeFormat::Docx => ".docx",
        }
    }
}

impl fmt::Display for ResumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded resume with its declared format.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub format: ResumeFormat,
}

/// Converts the resume into text the extraction prompt can carry.
///
/// PDF parsing is CPU-bound and runs inside `spawn_blocking`. Word formats need an
/// office converter this deployment does not ship, so they fail as conversion errors.
pub async fn resume_text(document: &ResumeDocument) -> Result<String, AppError> {
    match document.format {
        ResumeFormat::Pdf => {
            let bytes = document.bytes.clone();
            let text =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                    .await
                    .map_err(|e| AppError::Conversion(format!("PDF worker panicked: {e}")))?
                    .map_err(|e| AppError::Conversion(format!("could not read PDF: {e}")))?;

            if text.trim().is_empty() {
                return Err(AppError::Conversion(
                    "PDF contains no extractable text".to_string(),
                ));
            }
            Ok(text)
        }
        format @ (ResumeFormat::Doc | ResumeFormat::Docx) => Err(AppError::Conversion(format!(
            "{format} conversion is not available on this host"
        ))),
    }
}
