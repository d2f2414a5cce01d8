// Cross-cutting prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and composes these.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction shared by every extraction prompt so unknown values are explicit.
pub const NULL_SENTINEL_INSTRUCTION: &str =
    "Use the literal string 'Null' for any value that is unknown or absent.";

/// Instruction to keep skill lists comparable across resume and job description.
pub const SKILL_EXPANSION_INSTRUCTION: &str = "\
    Extract EXPLICIT skills only. \
    Split combined skills into separate entries. \
    Expand ALL abbreviations (AWS -> Amazon Web Services).";
