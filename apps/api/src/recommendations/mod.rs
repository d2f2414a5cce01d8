//! Course recommendations for missing skills.
//!
//! `RecommendationFetcher` walks an ordered chain of `CourseProvider`s per skill.
//! Provider failures are values (`Result<_, ProviderError>`) consumed by the
//! fetch loop, logged, and treated as zero results. Nothing here can fail the
//! analysis request.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::CourseRecommendation;

pub mod fetcher;
pub mod providers;

pub use fetcher::RecommendationFetcher;
pub use providers::{CourseraProvider, DuckDuckGoProvider, SearchHttp};

// ────────────────────────────────────────────────────────────────────────────
// Provider capability
// ────────────────────────────────────────────────────────────────────────────

/// Why a single provider call produced nothing.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("could not parse response: {0}")]
    Parse(String),
}

/// A course-search source. Implement this to add, replace, or fake a provider
/// without touching the fetch loop.
#[async_trait]
pub trait CourseProvider: Send + Sync {
    /// Stable identifier, stored as `CourseRecommendation::source`.
    fn name(&self) -> &str;

    /// Most entries this provider contributes for one skill.
    fn max_results(&self) -> usize;

    async fn search(&self, skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Policy
// ────────────────────────────────────────────────────────────────────────────

/// Bounds on how much work one fetch may do.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPolicy {
    /// Only the first `max_skills` missing skills are searched.
    pub max_skills: usize,
    /// The chain stops for a skill once this many recommendations are collected.
    pub target_per_skill: usize,
    /// Pause between successive skills.
    pub politeness_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_skills: 3,
            target_per_skill: 2,
            politeness_delay: Duration::from_secs(1),
        }
    }
}
