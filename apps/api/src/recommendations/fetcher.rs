use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::{CourseRecommendation, RecommendationMap};
use crate::recommendations::providers::{CourseraProvider, DuckDuckGoProvider, SearchHttp};
use crate::recommendations::{CourseProvider, FetchPolicy, ProviderError};

/// Queries the provider chain for each capped missing skill, one skill at a time.
#[derive(Clone)]
pub struct RecommendationFetcher {
    providers: Vec<Arc<dyn CourseProvider>>,
    policy: FetchPolicy,
}

impl RecommendationFetcher {
    pub fn new(providers: Vec<Arc<dyn CourseProvider>>, policy: FetchPolicy) -> Self {
        Self { providers, policy }
    }

    /// Search engine first, course catalog as fallback.
    pub fn with_default_providers(
        timeout: Duration,
        policy: FetchPolicy,
    ) -> Result<Self, ProviderError> {
        let http = SearchHttp::new(timeout)?;
        let providers: Vec<Arc<dyn CourseProvider>> = vec![
            Arc::new(DuckDuckGoProvider::new(http.clone())),
            Arc::new(CourseraProvider::new(http)),
        ];
        Ok(Self::new(providers, policy))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Every searched skill is present in the result, possibly with an empty list.
    /// Skills past `max_skills` are left out entirely.
    pub async fn fetch(&self, missing_skills: &[String]) -> RecommendationMap {
        let mut recommendations = RecommendationMap::new();

        for (index, skill) in missing_skills
            .iter()
            .take(self.policy.max_skills)
            .enumerate()
        {
            if index > 0 && !self.policy.politeness_delay.is_zero() {
                tokio::time::sleep(self.policy.politeness_delay).await;
            }

            let found = self.fetch_for_skill(skill).await;
            info!(skill = %skill, count = found.len(), "Collected course recommendations");
            recommendations.insert(skill.clone(), found);
        }

        if missing_skills.len() > self.policy.max_skills {
            debug!(
                "Skipped recommendations for {} skill(s) beyond the cap of {}",
                missing_skills.len() - self.policy.max_skills,
                self.policy.max_skills
            );
        }

        recommendations
    }

    async fn fetch_for_skill(&self, skill: &str) -> Vec<CourseRecommendation> {
        let mut collected = Vec::new();

        for provider in &self.providers {
            if collected.len() >= self.policy.target_per_skill {
                break;
            }

            match provider.search(skill).await {
                Ok(found) => {
                    debug!(
                        provider = provider.name(),
                        skill, "Provider returned {} candidate(s)", found.len()
                    );
                    collected.extend(found.into_iter().take(provider.max_results()));
                }
                Err(e) => {
                    warn!(provider = provider.name(), skill, "Course provider failed: {e}");
                }
            }
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted provider: returns `count` results, or fails when `fail` is set.
    struct FakeProvider {
        name: &'static str,
        max: usize,
        count: usize,
        fail: bool,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn returning(name: &'static str, max: usize, count: usize) -> Arc<Self> {
            Arc::new(Self {
                name,
                max,
                count,
                fail: false,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(name: &'static str, max: usize) -> Arc<Self> {
            Arc::new(Self {
                name,
                max,
                count: 0,
                fail: true,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CourseProvider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn max_results(&self) -> usize {
            self.max
        }

        async fn search(&self, skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(skill.to_string());
            if self.fail {
                return Err(ProviderError::Status(503));
            }
            Ok((0..self.count)
                .map(|i| CourseRecommendation {
                    title: format!("{skill} course {i}"),
                    link: format!("https://{}.example/{i}", self.name),
                    source: self.name.to_string(),
                })
                .collect())
        }
    }

    fn no_delay() -> FetchPolicy {
        FetchPolicy {
            politeness_delay: Duration::ZERO,
            ..FetchPolicy::default()
        }
    }

    fn fetcher(providers: Vec<Arc<dyn CourseProvider>>) -> RecommendationFetcher {
        RecommendationFetcher::new(providers, no_delay())
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fallback_skipped_when_primary_meets_target() {
        let primary = FakeProvider::returning("primary", 2, 2);
        let fallback = FakeProvider::returning("fallback", 1, 1);
        let fetcher = fetcher(vec![primary.clone(), fallback.clone()]);

        let recs = fetcher.fetch(&skills(&["Go"])).await;

        assert_eq!(recs["Go"].len(), 2);
        assert!(recs["Go"].iter().all(|r| r.source == "primary"));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_empty() {
        let primary = FakeProvider::returning("primary", 2, 0);
        let fallback = FakeProvider::returning("fallback", 1, 3);
        let fetcher = fetcher(vec![primary.clone(), fallback.clone()]);

        let recs = fetcher.fetch(&skills(&["Go"])).await;

        assert_eq!(fallback.calls(), 1);
        assert_eq!(recs["Go"].len(), 1);
        assert_eq!(recs["Go"][0].source, "fallback");
    }

    #[tokio::test]
    async fn test_partial_primary_is_topped_up_by_fallback() {
        let primary = FakeProvider::returning("primary", 2, 1);
        let fallback = FakeProvider::returning("fallback", 1, 1);
        let fetcher = fetcher(vec![primary, fallback]);

        let recs = fetcher.fetch(&skills(&["Kafka"])).await;

        let sources: Vec<_> = recs["Kafka"].iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["primary", "fallback"]);
    }

    #[tokio::test]
    async fn test_per_provider_cap_applied_to_oversized_results() {
        let primary = FakeProvider::returning("primary", 2, 10);
        let fetcher = fetcher(vec![primary]);

        let recs = fetcher.fetch(&skills(&["Rust"])).await;

        assert_eq!(recs["Rust"].len(), 2);
    }

    #[tokio::test]
    async fn test_all_providers_failing_yields_empty_list() {
        let primary = FakeProvider::failing("primary", 2);
        let fallback = FakeProvider::failing("fallback", 1);
        let fetcher = fetcher(vec![primary.clone(), fallback.clone()]);

        let recs = fetcher.fetch(&skills(&["Terraform"])).await;

        assert_eq!(recs.len(), 1);
        assert!(recs["Terraform"].is_empty());
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_primary_falls_through_to_fallback() {
        let primary = FakeProvider::failing("primary", 2);
        let fallback = FakeProvider::returning("fallback", 1, 1);
        let fetcher = fetcher(vec![primary, fallback]);

        let recs = fetcher.fetch(&skills(&["SQL"])).await;

        assert_eq!(recs["SQL"].len(), 1);
    }

    #[tokio::test]
    async fn test_only_first_three_skills_are_searched() {
        let primary = FakeProvider::returning("primary", 2, 2);
        let fetcher = fetcher(vec![primary.clone()]);

        let recs = fetcher
            .fetch(&skills(&["A", "B", "C", "D", "E"]))
            .await;

        assert_eq!(recs.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(*primary.seen.lock().unwrap(), skills(&["A", "B", "C"]));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let primary = FakeProvider::returning("primary", 2, 2);
        let fetcher = fetcher(vec![primary.clone()]);

        let recs = fetcher.fetch(&[]).await;

        assert!(recs.is_empty());
        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_politeness_delay_between_skills_only() {
        let primary = FakeProvider::returning("primary", 2, 2);
        let fetcher = RecommendationFetcher::new(vec![primary], FetchPolicy::default());

        let start = tokio::time::Instant::now();
        fetcher.fetch(&skills(&["A", "B", "C"])).await;

        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_default_chain_order() {
        let fetcher =
            RecommendationFetcher::with_default_providers(Duration::from_secs(5), no_delay())
                .unwrap();
        assert_eq!(fetcher.provider_names(), vec!["duckduckgo", "coursera"]);
    }
}
