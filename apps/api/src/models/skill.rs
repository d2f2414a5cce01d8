use serde::{Deserialize, Serialize};

use crate::analysis::normalize::normalize_skill;

/// The literal the extraction service uses for "value unknown", compared
/// against the normalized form.
pub const NULL_SENTINEL: &str = "null";

/// A skill (or certificate, or tool) as extracted, paired with its comparable key.
///
/// Serializes as the raw string, so profiles keep their wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SkillToken {
    raw: String,
    normalized: String,
}

impl SkillToken {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_skill(&raw);
        Self { raw, normalized }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True for the "unknown" sentinel in any casing or padding.
    pub fn is_unknown(&self) -> bool {
        self.normalized == NULL_SENTINEL
    }
}

impl From<String> for SkillToken {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for SkillToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<SkillToken> for String {
    fn from(token: SkillToken) -> Self {
        token.raw
    }
}

/// Builds tokens from raw strings.
#[cfg(test)]
pub fn tokens<S: AsRef<str>>(raw: &[S]) -> Vec<SkillToken> {
    raw.iter().map(|s| SkillToken::new(s.as_ref())).collect()
}
