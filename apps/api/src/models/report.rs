use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{JobRequirement, ResumeProfile};

/// Outcome of comparing resume skills against required skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 100, one decimal place.
    pub score_percentage: f64,
    /// Original-cased requirement strings, sorted.
    pub matched_skills: Vec<String>,
    /// Original-cased requirement strings, sorted.
    pub missing_skills: Vec<String>,
    /// Distinct normalized requirements, sentinel excluded.
    pub total_skills_count: usize,
    pub matched_count: usize,
}

/// A single course suggestion for a missing skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub title: String,
    /// Absolute URL.
    pub link: String,
    /// Name of the provider that produced it.
    pub source: String,
}

/// Missing skill (original casing) → its recommendations. A skill with no
/// recommendations is still present, mapped to an empty list.
pub type RecommendationMap = BTreeMap<String, Vec<CourseRecommendation>>;

/// Score band used to color the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Strong
        } else if score >= 50.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    /// Hex color the renderer uses for this band.
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Strong => "#16a34a",
            ScoreBand::Moderate => "#f59e0b",
            ScoreBand::Weak => "#dc2626",
        }
    }
}

/// Everything the renderer needs for one analysis. Built once, read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub resume_data: ResumeProfile,
    pub jd_data: JobRequirement,
    pub match_details: MatchResult,
    pub match_score: f64,
    pub course_recommendations: RecommendationMap,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.match_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(49.9), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Weak);
    }

    #[test]
    fn test_band_colors_are_distinct() {
        assert_ne!(ScoreBand::Strong.color(), ScoreBand::Moderate.color());
        assert_ne!(ScoreBand::Moderate.color(), ScoreBand::Weak.color());
    }
}
