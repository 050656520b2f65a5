//! Request validation for the symptom checker APIs.
//!
//! The engine assumes valid input; every check on user-supplied values happens here, before a
//! request reaches `symcheck-core`. Validation collects all failures instead of stopping at
//! the first one so a client can fix a form in one round trip.

use crate::dto::AnalyzeReq;
use serde_json::Value;
use symcheck_core::{AnalysisRequest, DurationBucket, Gender, SeverityLevel};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
pub const MIN_SYMPTOMS_CHARS: usize = 10;
pub const MAX_SYMPTOMS_CHARS: usize = 1000;
pub const MIN_QUERY_CHARS: usize = 2;

/// Field names in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 5] = ["age", "gender", "symptoms", "duration", "severity"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Validate an analyze body and convert it into an engine request.
///
/// A field that is absent or JSON `null` counts as missing. Missing fields are reported
/// before any value checks run. A value of the wrong JSON type fails its value check like
/// any other bad value.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] or [`ValidationError::Invalid`].
pub fn validate_analyze_req(req: &AnalyzeReq) -> Result<AnalysisRequest, ValidationError> {
    let present = [&req.age, &req.gender, &req.symptoms, &req.duration, &req.severity]
        .map(|field| field.as_ref().is_some_and(|v| !v.is_null()));
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| (*name).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut errors = Vec::new();

    let age = match req.age.as_ref().and_then(parse_age) {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => u8::try_from(age).ok(),
        Some(_) => {
            errors.push(format!("Age must be between {MIN_AGE} and {MAX_AGE}"));
            None
        }
        None => {
            errors.push("Age must be a valid number".to_owned());
            None
        }
    };

    let gender = parse_wire::<Gender>(
        req.gender.as_ref(),
        "Gender",
        &Gender::WIRE_VALUES,
        &mut errors,
    );

    let symptoms = match &req.symptoms {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let chars = symptoms.chars().count();
    if chars < MIN_SYMPTOMS_CHARS {
        errors.push(format!(
            "Symptoms description must be at least {MIN_SYMPTOMS_CHARS} characters long"
        ));
    }
    if chars > MAX_SYMPTOMS_CHARS {
        errors.push(format!(
            "Symptoms description must be less than {MAX_SYMPTOMS_CHARS} characters"
        ));
    }

    let duration = parse_wire::<DurationBucket>(
        req.duration.as_ref(),
        "Duration",
        &DurationBucket::WIRE_VALUES,
        &mut errors,
    );
    let severity = parse_wire::<SeverityLevel>(
        req.severity.as_ref(),
        "Severity",
        &SeverityLevel::WIRE_VALUES,
        &mut errors,
    );

    match (age, gender, duration, severity) {
        (Some(age), Some(gender), Some(duration), Some(severity)) if errors.is_empty() => {
            Ok(AnalysisRequest {
                age,
                gender,
                symptom_text: symptoms,
                duration,
                severity,
            })
        }
        _ => Err(ValidationError::Invalid(errors)),
    }
}

/// Validate the free text of an emergency check. Returns the trimmed text.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] when the text is absent or blank.
pub fn validate_emergency_symptoms(symptoms: Option<&str>) -> Result<&str, ValidationError> {
    match symptoms.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingFields(vec!["symptoms".to_owned()])),
    }
}

/// Validate a condition search query. Returns the trimmed query.
///
/// # Errors
///
/// Returns [`ValidationError::Invalid`] when the query is shorter than two characters.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, ValidationError> {
    let q = query.unwrap_or_default().trim();
    if q.chars().count() < MIN_QUERY_CHARS {
        return Err(ValidationError::Invalid(vec![format!(
            "Search query must be at least {MIN_QUERY_CHARS} characters long"
        )]));
    }
    Ok(q)
}

// Accepts a JSON number (fractions truncate toward zero) or a string holding an integer.
fn parse_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

// Only a JSON string can name an enum value; any other type gets the same message.
fn parse_wire<T: std::str::FromStr>(
    value: Option<&Value>,
    label: &str,
    expected: &[&str],
    errors: &mut Vec<String>,
) -> Option<T> {
    match value.and_then(Value::as_str).map(str::parse::<T>) {
        Some(Ok(parsed)) => Some(parsed),
        _ => {
            errors.push(format!("{label} must be one of: {}", expected.join(", ")));
            None
        }
    }
}
