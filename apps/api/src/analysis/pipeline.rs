//! One analysis request, start to finish:
//! extraction → matching → (missing skills only) recommendations → aggregation.

use chrono::Utc;
use tracing::info;

use crate::analysis::aggregator::aggregate;
use crate::analysis::matcher::match_skills;
use crate::errors::AppError;
use crate::extraction::{DocumentExtractor, ResumeDocument};
use crate::models::{RecommendationMap, Report};
use crate::recommendations::RecommendationFetcher;

#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub resume: ResumeDocument,
    pub jd_text: String,
    pub target_location: Option<String>,
}

/// Extraction failures abort the run. Recommendation failures never do.
pub async fn run_analysis(
    extractor: &dyn DocumentExtractor,
    fetcher: &RecommendationFetcher,
    input: &AnalysisInput,
) -> Result<Report, AppError> {
    let resume = extractor
        .extract_resume(&input.resume, input.target_location.as_deref())
        .await?;
    let jd = extractor.extract_job(&input.jd_text).await?;

    let match_result = match_skills(&resume.skills, &jd.skills_required);
    info!(
        score = match_result.score_percentage,
        matched = match_result.matched_count,
        total = match_result.total_skills_count,
        "Skill match computed"
    );

    let recommendations = if match_result.missing_skills.is_empty() {
        RecommendationMap::new()
    } else {
        fetcher.fetch(&match_result.missing_skills).await
    };

    Ok(aggregate(
        resume,
        jd,
        match_result,
        recommendations,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{
        counting_provider, failing_provider, pdf_input, FakeExtractor,
    };
    use crate::recommendations::FetchPolicy;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn policy() -> FetchPolicy {
        FetchPolicy {
            politeness_delay: Duration::ZERO,
            ..FetchPolicy::default()
        }
    }

    #[tokio::test]
    async fn test_full_run_produces_report() {
        let extractor = FakeExtractor::new(&["Python", "SQL"], &["Python", "SQL", "Go"]);
        let (provider, calls) = counting_provider(2);
        let fetcher = RecommendationFetcher::new(vec![provider], policy());

        let report = run_analysis(&extractor, &fetcher, &pdf_input("Need Go"))
            .await
            .unwrap();

        assert_eq!(report.match_score, 66.7);
        assert_eq!(report.match_details.missing_skills, vec!["Go"]);
        assert_eq!(report.course_recommendations["Go"].len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_fetch_when_nothing_missing() {
        let extractor = FakeExtractor::new(&["Rust", "Go"], &["rust"]);
        let (provider, calls) = counting_provider(2);
        let fetcher = RecommendationFetcher::new(vec![provider], policy());

        let report = run_analysis(&extractor, &fetcher, &pdf_input("Rust role"))
            .await
            .unwrap();

        assert_eq!(report.match_score, 100.0);
        assert!(report.course_recommendations.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failures_do_not_fail_the_run() {
        let extractor = FakeExtractor::new(&[], &["Kafka", "Airflow"]);
        let fetcher = RecommendationFetcher::new(
            vec![failing_provider(), failing_provider()],
            policy(),
        );

        let report = run_analysis(&extractor, &fetcher, &pdf_input("Data role"))
            .await
            .unwrap();

        assert_eq!(report.course_recommendations.len(), 2);
        assert!(report.course_recommendations.values().all(Vec::is_empty));
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts() {
        let extractor = FakeExtractor::failing();
        let (provider, calls) = counting_provider(2);
        let fetcher = RecommendationFetcher::new(vec![provider], policy());

        let err = run_analysis(&extractor, &fetcher, &pdf_input("Any"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Extraction(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_target_location_forwarded_to_extractor() {
        let extractor = FakeExtractor::new(&["Go"], &["Go"]);
        let fetcher = RecommendationFetcher::new(vec![], policy());
        let mut input = pdf_input("Go role");
        input.target_location = Some("Lisbon".to_string());

        let report = run_analysis(&extractor, &fetcher, &input).await.unwrap();

        assert_eq!(report.resume_data.location, "Lisbon");
    }
}
