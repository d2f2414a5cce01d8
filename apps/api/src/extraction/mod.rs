//! Document Extraction — turns an uploaded resume and a job-description text into
//! typed profiles.
//!
//! `AppState` holds an `Arc<dyn DocumentExtractor>`; the default backend is
//! `LlmExtractor`. Every call goes through `coerce` before a profile is returned.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::{JobRequirement, ResumeProfile};

pub mod coerce;
pub mod document;
pub mod prompts;

pub use document::{ResumeDocument, ResumeFormat};

/// The extraction capability the analysis pipeline depends on.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_resume(
        &self,
        document: &ResumeDocument,
        target_location: Option<&str>,
    ) -> Result<ResumeProfile, AppError>;

    async fn extract_job(&self, jd_text: &str) -> Result<JobRequirement, AppError>;
}

/// Extraction via the LLM. Resume PDFs are converted to text locally first.
pub struct LlmExtractor {
    llm: LlmClient,
}

impl LlmExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn call(&self, prompt: &str, what: &str) -> Result<Value, AppError> {
        self.llm
            .call_json::<Value>(prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Extraction(format!("{what} parsing failed: {e}")))
    }
}

#[async_trait]
impl DocumentExtractor for LlmExtractor {
    async fn extract_resume(
        &self,
        document: &ResumeDocument,
        target_location: Option<&str>,
    ) -> Result<ResumeProfile, AppError> {
        let text = document::resume_text(document).await?;
        info!(
            format = %document.format,
            chars = text.len(),
            "Extracting resume profile"
        );

        let raw = self
            .call(&prompts::resume_prompt(&text, target_location), "Resume")
            .await?;
        coerce::coerce_resume(raw, document.format)
    }

    async fn extract_job(&self, jd_text: &str) -> Result<JobRequirement, AppError> {
        info!(chars = jd_text.len(), "Extracting job requirements");
        let raw = self.call(&prompts::job_prompt(jd_text), "JD").await?;
        coerce::coerce_job(raw)
    }
}
