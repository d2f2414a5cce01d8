//! Skill Matcher — set comparison of resume skills against required skills.
//!
//! Algorithm:
//! 1. Normalize both sides into sets; the unknown sentinel is dropped from both.
//! 2. matched = required ∩ resume, missing = required − resume
//! 3. Every original requirement spelling whose key is matched/missing is reported,
//!    so "AWS" and "aws" both appear when both were listed.
//! 4. score = round(|matched| / |required| × 100, 1), or 0 when nothing is required.

use std::collections::HashSet;

use crate::models::{MatchResult, SkillToken};

pub fn match_skills(resume_skills: &[SkillToken], required_skills: &[SkillToken]) -> MatchResult {
    let resume_set = key_set(resume_skills);
    let required_set = key_set(required_skills);

    let matched_set: HashSet<&str> = required_set.intersection(&resume_set).copied().collect();

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();
    for token in required_skills.iter().filter(|t| !t.is_unknown()) {
        if matched_set.contains(token.normalized()) {
            matched_skills.push(token.raw().to_string());
        } else {
            missing_skills.push(token.raw().to_string());
        }
    }
    matched_skills.sort();
    missing_skills.sort();

    let total_skills_count = required_set.len();
    let matched_count = matched_set.len();

    MatchResult {
        score_percentage: score_percentage(matched_count, total_skills_count),
        matched_skills,
        missing_skills,
        total_skills_count,
        matched_count,
    }
}

fn key_set(tokens: &[SkillToken]) -> HashSet<&str> {
    tokens
        .iter()
        .filter(|t| !t.is_unknown())
        .map(SkillToken::normalized)
        .collect()
}

fn score_percentage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (matched as f64 / total as f64 * 1000.0).round_ties_even() / 10.0
}
