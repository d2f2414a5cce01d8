//! Strict boundary between loosely-typed LLM JSON and the typed profiles.
//!
//! The model may return scalars where lists are expected, strings where booleans
//! are expected, or numbers where strings are expected. Everything is coerced
//! here; nothing untyped leaves this module.

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::extraction::document::ResumeFormat;
use crate::models::{JobRequirement, ResumeProfile};

const RESUME_LIST_FIELDS: &[&str] = &["skills", "certificates", "tools_and_tech"];
const RESUME_BOOL_FIELDS: &[&str] = &[
    "document_parsability",
    "document_structure",
    "avoidance_of_non_parseable_elements",
];
const RESUME_TEXT_FIELDS: &[&str] = &[
    "years_of_experience",
    "education",
    "document_parsability_reason",
    "document_structure_reason",
    "avoidance_of_non_parseable_elements_reason",
    "location",
];

const JOB_LIST_FIELDS: &[&str] = &[
    "skills_required",
    "certificates_required",
    "tools_technologies",
];
const JOB_TEXT_FIELDS: &[&str] = &[
    "role",
    "years_of_experience_required",
    "required_qualification",
    "minimum_qualification",
    "location",
];

/// Missing job-description lists become an explicit unknown so they never count.
const UNKNOWN_LIST: &[&str] = &["Null"];

pub fn coerce_resume(raw: Value, format: ResumeFormat) -> Result<ResumeProfile, AppError> {
    let mut map = into_object(raw, "resume")?;

    for field in RESUME_LIST_FIELDS {
        coerce_list(&mut map, field, &[]);
    }
    for field in RESUME_BOOL_FIELDS {
        let value = to_bool(map.get(*field));
        map.insert(field.to_string(), Value::Bool(value));
    }
    for field in RESUME_TEXT_FIELDS {
        coerce_text(&mut map, field);
    }
    map.insert(
        "file_format".to_string(),
        Value::String(format.extension().to_string()),
    );

    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::Extraction(format!("resume response has wrong shape: {e}")))
}

pub fn coerce_job(raw: Value) -> Result<JobRequirement, AppError> {
    // Some responses wrap the object in a one-element array.
    let raw = match raw {
        Value::Array(items) => items.into_iter().next().ok_or_else(|| {
            AppError::Extraction("job description response was an empty array".to_string())
        })?,
        other => other,
    };
    let mut map = into_object(raw, "job description")?;

    for field in JOB_LIST_FIELDS {
        coerce_list(&mut map, field, UNKNOWN_LIST);
    }
    for field in JOB_TEXT_FIELDS {
        coerce_text(&mut map, field);
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| {
        AppError::Extraction(format!("job description response has wrong shape: {e}"))
    })
}

fn into_object(raw: Value, what: &str) -> Result<Map<String, Value>, AppError> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Extraction(format!(
            "{what} response was not a JSON object: {other}"
        ))),
    }
}

/// Lists stay lists (with scalar items stringified); a truthy scalar becomes a
/// one-element list; anything else becomes `empty`.
fn coerce_list(map: &mut Map<String, Value>, field: &str, empty: &[&str]) {
    let items: Vec<Value> = match map.remove(field) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| scalar_text(&item))
            .map(Value::String)
            .collect(),
        Some(value) if is_truthy(&value) => scalar_text(&value)
            .map(Value::String)
            .into_iter()
            .collect(),
        _ => empty.iter().map(|s| Value::String(s.to_string())).collect(),
    };
    map.insert(field.to_string(), Value::Array(items));
}

fn coerce_text(map: &mut Map<String, Value>, field: &str) {
    let text = map
        .get(field)
        .and_then(scalar_text)
        .unwrap_or_default();
    map.insert(field.to_string(), Value::String(text));
}

/// `true`, or any of "true" / "yes" / "1" in any casing. Everything else is false.
pub(crate) fn to_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Some(Value::Number(n)) => n.to_string() == "1",
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
