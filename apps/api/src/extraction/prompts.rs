// Prompts for resume and job-description extraction.
// Shared fragments come from llm_client::prompts.

use crate::llm_client::prompts::{NULL_SENTINEL_INSTRUCTION, SKILL_EXPANSION_INSTRUCTION};

const RESUME_SCHEMA: &str = r#"{
  "skills": ["skill1"],
  "certificates": ["cert1"],
  "tools_and_tech": ["tool1"],
  "years_of_experience": "string",
  "education": "string",
  "document_parsability": true,
  "document_parsability_reason": "string",
  "file_format": "string",
  "document_structure": true,
  "document_structure_reason": "string",
  "avoidance_of_non_parseable_elements": true,
  "avoidance_of_non_parseable_elements_reason": "string",
  "location": "string"
}"#;

const JOB_SCHEMA: &str = r#"{
  "role": "Job Title",
  "skills_required": ["skill1"],
  "certificates_required": ["cert1"],
  "tools_technologies": ["tool1"],
  "years_of_experience_required": "string",
  "required_qualification": "string",
  "minimum_qualification": "string",
  "location": "Location or Null"
}"#;

/// Builds the resume extraction prompt. `target_location` adds a proximity hint.
pub fn resume_prompt(resume_text: &str, target_location: Option<&str>) -> String {
    let location_clause = target_location
        .map(|loc| format!("Target location for proximity assessment: {loc}.\n"))
        .unwrap_or_default();

    format!(
        "You are a resume parser. Analyze the resume text below and extract fields for the JSON schema. \
         Return one valid JSON object.\n\
         {NULL_SENTINEL_INSTRUCTION}\n\
         {location_clause}\
         Guidelines:\n\
         - {SKILL_EXPANSION_INSTRUCTION}\n\
         - Evaluate document_parsability, document_structure and avoidance_of_non_parseable_elements \
           as an applicant tracking system would, and give a one-sentence reason for each.\n\
         Schema:\n{RESUME_SCHEMA}\n\n\
         Resume text:\n{resume_text}"
    )
}

/// Builds the job-description extraction prompt.
pub fn job_prompt(jd_text: &str) -> String {
    format!(
        "Extract job info from the text below into JSON.\n\
         Schema:\n{JOB_SCHEMA}\n\
         Rules:\n\
         - {SKILL_EXPANSION_INSTRUCTION}\n\
         - {NULL_SENTINEL_INSTRUCTION}\n\n\
         JD Text:\n{jd_text}"
    )
}
