pub mod profile;
pub mod report;
pub mod skill;

pub use profile::{JobRequirement, ResumeProfile};
pub use report::{CourseRecommendation, MatchResult, RecommendationMap, Report, ScoreBand};
pub use skill::{SkillToken, NULL_SENTINEL};

#[cfg(test)]
pub use skill::tokens;
