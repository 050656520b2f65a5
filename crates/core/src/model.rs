//! Domain types shared by the engine components.
//!
//! Ordered enums derive `Ord` in declaration order; the scoring rules compare them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body system a condition belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Respiratory,
    Gastrointestinal,
    Neurological,
    Cardiovascular,
    Musculoskeletal,
    Dermatological,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Respiratory,
        Category::Gastrointestinal,
        Category::Neurological,
        Category::Cardiovascular,
        Category::Musculoskeletal,
        Category::Dermatological,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Respiratory => "respiratory",
            Category::Gastrointestinal => "gastrointestinal",
            Category::Neurological => "neurological",
            Category::Cardiovascular => "cardiovascular",
            Category::Musculoskeletal => "musculoskeletal",
            Category::Dermatological => "dermatological",
            Category::Other => "other",
        }
    }
}

/// Self-reported severity, chosen by the user rather than inferred from text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    pub const WIRE_VALUES: [&'static str; 3] = ["mild", "moderate", "severe"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeverityLevel::Mild => "Mild",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Severe => "Severe",
        };
        f.write_str(label)
    }
}

impl FromStr for SeverityLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mild" => Ok(SeverityLevel::Mild),
            "moderate" => Ok(SeverityLevel::Moderate),
            "severe" => Ok(SeverityLevel::Severe),
            other => Err(ParseEnumError::new("severity", other, &Self::WIRE_VALUES)),
        }
    }
}

/// How long the symptoms have lasted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationBucket {
    #[serde(rename = "less_than_24h")]
    LessThan24Hours,
    #[serde(rename = "1_3_days")]
    OneToThreeDays,
    #[serde(rename = "4_7_days")]
    FourToSevenDays,
    #[serde(rename = "1_2_weeks")]
    OneToTwoWeeks,
    #[serde(rename = "more_than_2_weeks")]
    MoreThanTwoWeeks,
}

impl DurationBucket {
    pub const WIRE_VALUES: [&'static str; 5] = [
        "less_than_24h",
        "1_3_days",
        "4_7_days",
        "1_2_weeks",
        "more_than_2_weeks",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::LessThan24Hours => "less_than_24h",
            DurationBucket::OneToThreeDays => "1_3_days",
            DurationBucket::FourToSevenDays => "4_7_days",
            DurationBucket::OneToTwoWeeks => "1_2_weeks",
            DurationBucket::MoreThanTwoWeeks => "more_than_2_weeks",
        }
    }
}

impl FromStr for DurationBucket {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "less_than_24h" => Ok(DurationBucket::LessThan24Hours),
            "1_3_days" => Ok(DurationBucket::OneToThreeDays),
            "4_7_days" => Ok(DurationBucket::FourToSevenDays),
            "1_2_weeks" => Ok(DurationBucket::OneToTwoWeeks),
            "more_than_2_weeks" => Ok(DurationBucket::MoreThanTwoWeeks),
            other => Err(ParseEnumError::new("duration", other, &Self::WIRE_VALUES)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const WIRE_VALUES: [&'static str; 3] = ["male", "female", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(ParseEnumError::new("gender", other, &Self::WIRE_VALUES)),
        }
    }
}

/// Returned when a wire string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be one of: {expected}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseEnumError {
    fn new(field: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            field,
            value: value.to_owned(),
            expected: expected.join(", "),
        }
    }
}

/// Emergency tier. Declaration order is priority order: Critical sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyTier {
    Critical,
    Urgent,
    Warning,
}

impl EmergencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyTier::Critical => "critical",
            EmergencyTier::Urgent => "urgent",
            EmergencyTier::Warning => "warning",
        }
    }
}

/// Low / Medium / High label used for both risk and confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        f.write_str(label)
    }
}

pub type RiskLevel = Level;
pub type ConfidenceLevel = Level;

/// A validated analysis request.
///
/// Field ranges are enforced by the API layer before a request reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "symptoms")]
    pub symptom_text: String,
    pub duration: DurationBucket,
    pub severity: SeverityLevel,
}

/// The structured outcome of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub possible_conditions: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub emergency_warnings: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    pub risk_assessment: RiskLevel,
    pub follow_up_recommendations: Vec<String>,
    pub input_data: AnalysisRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_buckets_are_ordered() {
        assert!(DurationBucket::LessThan24Hours < DurationBucket::OneToThreeDays);
        assert!(DurationBucket::OneToTwoWeeks < DurationBucket::MoreThanTwoWeeks);
        assert!(DurationBucket::OneToTwoWeeks >= DurationBucket::OneToTwoWeeks);
    }

    #[test]
    fn severity_is_ordered_and_capitalized_for_display() {
        assert!(SeverityLevel::Mild < SeverityLevel::Moderate);
        assert!(SeverityLevel::Moderate < SeverityLevel::Severe);
        assert_eq!(SeverityLevel::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn critical_tier_sorts_first() {
        let mut tiers = vec![EmergencyTier::Warning, EmergencyTier::Critical, EmergencyTier::Urgent];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![EmergencyTier::Critical, EmergencyTier::Urgent, EmergencyTier::Warning]
        );
    }

    #[test]
    fn wire_values_parse_and_serialize_consistently() {
        for value in DurationBucket::WIRE_VALUES {
            let parsed: DurationBucket = value.parse().expect("known duration");
            assert_eq!(parsed.as_str(), value);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), format!("\"{value}\""));
        }
        assert_eq!(serde_json::to_string(&Level::Medium).unwrap(), "\"Medium\"");
        assert_eq!(serde_json::to_string(&Category::Respiratory).unwrap(), "\"respiratory\"");
    }

    #[test]
    fn unknown_wire_value_reports_expected_set() {
        let err = "extreme".parse::<SeverityLevel>().expect_err("unknown severity");
        assert_eq!(err.to_string(), "severity must be one of: mild, moderate, severe");
        assert!("Male".parse::<Gender>().is_err());
    }
}
