use serde::{Deserialize, Serialize};

use crate::models::skill::SkillToken;

/// Structured view of a candidate resume, produced once per request by the
/// extraction service and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub skills: Vec<SkillToken>,
    pub certificates: Vec<SkillToken>,
    pub tools_and_tech: Vec<SkillToken>,
    pub years_of_experience: String,
    pub education: String,
    pub document_parsability: bool,
    pub document_parsability_reason: String,
    pub file_format: String,
    pub document_structure: bool,
    pub document_structure_reason: String,
    pub avoidance_of_non_parseable_elements: bool,
    pub avoidance_of_non_parseable_elements_reason: String,
    pub location: String,
}

/// Structured view of a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirement {
    pub role: String,
    pub skills_required: Vec<SkillToken>,
    pub certificates_required: Vec<SkillToken>,
    pub tools_technologies: Vec<SkillToken>,
    pub years_of_experience_required: String,
    pub required_qualification: String,
    pub minimum_qualification: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_profile_absent_fields_default_to_empty() {
        let profile: ResumeProfile = serde_json::from_str(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(profile.skills.len(), 1);
        assert!(profile.certificates.is_empty());
        assert_eq!(profile.years_of_experience, "");
        assert!(!profile.document_parsability);
    }

    #[test]
    fn test_job_requirement_deserializes_full_payload() {
        let json = r#"{
            "role": "Backend Engineer",
            "skills_required": ["Python", "SQL"],
            "certificates_required": ["Null"],
            "tools_technologies": ["Docker"],
            "years_of_experience_required": "3+ years",
            "required_qualification": "BSc Computer Science",
            "minimum_qualification": "Diploma",
            "location": "Remote"
        }"#;
        let jd: JobRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(jd.role, "Backend Engineer");
        assert_eq!(jd.skills_required[1].raw(), "SQL");
        assert!(jd.certificates_required[0].is_unknown());
        assert_eq!(jd.location, "Remote");
    }
}
