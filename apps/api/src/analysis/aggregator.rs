use chrono::{DateTime, Utc};

use crate::models::{
    JobRequirement, MatchResult, RecommendationMap, Report, ResumeProfile, NULL_SENTINEL,
};

const UNKNOWN_PLACEHOLDER: &str = "N/A";

/// Assembles the final report. Pure: the timestamp is passed in.
pub fn aggregate(
    resume: ResumeProfile,
    jd: JobRequirement,
    match_result: MatchResult,
    recommendations: RecommendationMap,
    generated_at: DateTime<Utc>,
) -> Report {
    let summary = build_summary(&resume);
    Report {
        match_score: match_result.score_percentage,
        resume_data: resume,
        jd_data: jd,
        match_details: match_result,
        course_recommendations: recommendations,
        summary,
        generated_at,
    }
}

fn build_summary(resume: &ResumeProfile) -> String {
    let years = resume.years_of_experience.trim();
    let years = if years.is_empty() || years.eq_ignore_ascii_case(NULL_SENTINEL) {
        UNKNOWN_PLACEHOLDER
    } else {
        years
    };
    format!("Analysis for {years} experience candidate.")
}
