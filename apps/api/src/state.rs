use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::recommendations::RecommendationFetcher;
use crate::render::ReportRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup; requests share no pipeline state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable extraction backend. Default: LlmExtractor.
    pub extractor: Arc<dyn DocumentExtractor>,
    pub fetcher: Arc<RecommendationFetcher>,
    pub renderer: Arc<dyn ReportRenderer>,
}
