//! Wire types for the symptom checker HTTP API.
//!
//! Request bodies keep every field optional so that missing fields can be reported together
//! instead of failing on the first one. Response bodies are flat JSON with snake_case keys.

use serde::{Deserialize, Serialize};
use symcheck_core::{AnalysisRequest, AnalysisResult, Condition, EmergencyCheck, EmergencyFinding};
use utoipa::ToSchema;

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Integer 1-120. An integer string such as `"42"` is also accepted; fractions are truncated.
    #[schema(value_type = Option<i64>)]
    pub age: Option<serde_json::Value>,
    /// `male`, `female` or `other`.
    #[schema(value_type = Option<String>)]
    pub gender: Option<serde_json::Value>,
    /// Free-text description, 10-1000 characters after trimming.
    #[schema(value_type = Option<String>)]
    pub symptoms: Option<serde_json::Value>,
    /// `less_than_24h`, `1_3_days`, `4_7_days`, `1_2_weeks` or `more_than_2_weeks`.
    #[schema(value_type = Option<String>)]
    pub duration: Option<serde_json::Value>,
    /// `mild`, `moderate` or `severe`.
    #[schema(value_type = Option<String>)]
    pub severity: Option<serde_json::Value>,
}

/// Echo of the validated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InputData {
    pub age: u8,
    pub gender: String,
    pub symptoms: String,
    pub duration: String,
    pub severity: String,
}

impl From<&AnalysisRequest> for InputData {
    fn from(req: &AnalysisRequest) -> Self {
        Self {
            age: req.age,
            gender: req.gender.as_str().to_owned(),
            symptoms: req.symptom_text.clone(),
            duration: req.duration.as_str().to_owned(),
            severity: req.severity.as_str().to_owned(),
        }
    }
}

/// Response of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRes {
    pub analysis_id: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub summary: String,
    pub possible_conditions: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub emergency_warnings: Vec<String>,
    /// `Low`, `Medium` or `High`.
    pub confidence_level: String,
    /// `Low`, `Medium` or `High`.
    pub risk_assessment: String,
    pub follow_up_recommendations: Vec<String>,
    pub input_data: InputData,
}

impl From<AnalysisResult> for AnalysisRes {
    fn from(result: AnalysisResult) -> Self {
        Self {
            input_data: InputData::from(&result.input_data),
            analysis_id: result.analysis_id,
            timestamp: result.timestamp.to_rfc3339(),
            summary: result.summary,
            possible_conditions: result.possible_conditions,
            recommended_actions: result.recommended_actions,
            emergency_warnings: result.emergency_warnings,
            confidence_level: result.confidence_level.to_string(),
            risk_assessment: result.risk_assessment.to_string(),
            follow_up_recommendations: result.follow_up_recommendations,
        }
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

/// Response of `GET /api/symptoms/common`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommonSymptomsRes {
    pub common_symptoms: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for CommonSymptomsRes {
    fn from(common_symptoms: Vec<String>) -> Self {
        Self {
            count: common_symptoms.len(),
            common_symptoms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionSummary {
    pub name: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub base_risk_weight: f64,
}

impl From<&Condition> for ConditionSummary {
    fn from(c: &Condition) -> Self {
        Self {
            name: c.name.clone(),
            category: c.category.as_str().to_owned(),
            keywords: c.keywords.clone(),
            base_risk_weight: c.base_risk_weight,
        }
    }
}

/// Query string of `GET /api/conditions/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Response of `GET /api/conditions/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchConditionsRes {
    pub query: String,
    pub results: Vec<ConditionSummary>,
    pub count: usize,
}

/// Body of `POST /api/emergency/check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmergencyCheckReq {
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WarningSign {
    /// `critical`, `urgent` or `warning`.
    pub tier: String,
    pub message: String,
    pub matched_phrases: Vec<String>,
}

impl From<EmergencyFinding> for WarningSign {
    fn from(f: EmergencyFinding) -> Self {
        Self {
            tier: f.tier.as_str().to_owned(),
            message: f.message,
            matched_phrases: f.matched_phrases,
        }
    }
}

/// Response of `POST /api/emergency/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyCheckRes {
    pub is_emergency: bool,
    /// `critical`, `urgent`, `warning` or `none`.
    pub urgency_level: String,
    pub warning_signs: Vec<WarningSign>,
    pub recommendation: String,
}

impl From<EmergencyCheck> for EmergencyCheckRes {
    fn from(check: EmergencyCheck) -> Self {
        Self {
            is_emergency: check.is_emergency,
            urgency_level: check
                .urgency_level
                .map_or("none", |tier| tier.as_str())
                .to_owned(),
            warning_signs: check.findings.into_iter().map(WarningSign::from).collect(),
            recommendation: check.recommendation,
        }
    }
}

/// Query string of `GET /api/health-tips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HealthTipsQuery {
    pub condition: Option<String>,
}

/// Response of `GET /api/health-tips`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthTipsRes {
    pub condition: Option<String>,
    pub tips: Vec<String>,
}

/// JSON error body shared by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}
