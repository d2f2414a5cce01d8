// Skill-gap analysis: normalization, matching, aggregation, and the request pipeline.
// Everything except `pipeline` and `handlers` is pure computation.

pub mod aggregator;
pub mod handlers;
pub mod matcher;
pub mod normalize;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::analysis::pipeline::AnalysisInput;
    use crate::errors::AppError;
    use crate::extraction::{DocumentExtractor, ResumeDocument, ResumeFormat};
    use crate::models::{tokens, CourseRecommendation, JobRequirement, ResumeProfile};
    use crate::recommendations::{CourseProvider, ProviderError};

    /// Returns canned profiles, or fails every call.
    pub struct FakeExtractor {
        resume: ResumeProfile,
        job: JobRequirement,
        fail: bool,
    }

    impl FakeExtractor {
        pub fn new(resume_skills: &[&str], required_skills: &[&str]) -> Self {
            Self {
                resume: ResumeProfile {
                    skills: tokens(resume_skills),
                    years_of_experience: "5 years".to_string(),
                    file_format: ".pdf".to_string(),
                    ..ResumeProfile::default()
                },
                job: JobRequirement {
                    role: "Platform Engineer".to_string(),
                    skills_required: tokens(required_skills),
                    ..JobRequirement::default()
                },
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[], &[])
            }
        }
    }

    #[async_trait]
    impl DocumentExtractor for FakeExtractor {
        async fn extract_resume(
            &self,
            _document: &ResumeDocument,
            target_location: Option<&str>,
        ) -> Result<ResumeProfile, AppError> {
            if self.fail {
                return Err(AppError::Extraction("model unavailable".to_string()));
            }
            let mut resume = self.resume.clone();
            if let Some(location) = target_location {
                resume.location = location.to_string();
            }
            Ok(resume)
        }

        async fn extract_job(&self, _jd_text: &str) -> Result<JobRequirement, AppError> {
            if self.fail {
                return Err(AppError::Extraction("model unavailable".to_string()));
            }
            Ok(self.job.clone())
        }
    }

    struct CountingProvider {
        count: usize,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CourseProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn max_results(&self) -> usize {
            2
        }

        async fn search(&self, skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..self.count)
                .map(|i| CourseRecommendation {
                    title: format!("{skill} fundamentals {i}"),
                    link: format!("https://courses.example/{i}"),
                    source: "counting".to_string(),
                })
                .collect())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CourseProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn max_results(&self) -> usize {
            2
        }

        async fn search(&self, _skill: &str) -> Result<Vec<CourseRecommendation>, ProviderError> {
            Err(ProviderError::Parse("layout changed".to_string()))
        }
    }

    /// A provider that returns `count` results and counts its calls.
    pub fn counting_provider(count: usize) -> (Arc<dyn CourseProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            count,
            calls: Arc::clone(&calls),
        };
        (Arc::new(provider), calls)
    }

    pub fn failing_provider() -> Arc<dyn CourseProvider> {
        Arc::new(FailingProvider)
    }

    pub fn pdf_input(jd_text: &str) -> AnalysisInput {
        AnalysisInput {
            resume: ResumeDocument {
                bytes: Bytes::from_static(b"%PDF-1.4"),
                format: ResumeFormat::Pdf,
            },
            jd_text: jd_text.to_string(),
            target_location: None,
        }
    }
}
