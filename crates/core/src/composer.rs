//! Assembly of the final [`AnalysisResult`].
//!
//! Pure formatting: no scoring happens here.

use crate::assessment::Assessment;
use crate::constants::{
    AGE_FOLLOW_UP, EMERGENCY_ACTION, GENERIC_SELF_CARE, MEDICAL_ATTENTION_ACTION,
    MONITOR_FOLLOW_UP, NO_MATCH_SUMMARY, OLDER_ADULT_AGE, PERSISTENT_FOLLOW_UP, YOUNG_CHILD_AGE,
};
use crate::emergency::EmergencyFinding;
use crate::matcher::ConditionMatch;
use crate::model::{AnalysisRequest, AnalysisResult, DurationBucket, Level};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Identity of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisStamp {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultComposer;

impl ResultComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        stamp: AnalysisStamp,
        request: &AnalysisRequest,
        matches: &[ConditionMatch<'_>],
        findings: &[EmergencyFinding],
        assessment: Assessment,
    ) -> AnalysisResult {
        let top = matches.first().map(|m| m.condition);

        let summary = match top {
            Some(condition) => format!(
                "Analysis suggests possible {} with {} symptoms",
                condition.name, request.severity
            ),
            None => NO_MATCH_SUMMARY.to_owned(),
        };

        let mut actions: Vec<String> = Vec::new();
        match assessment.risk {
            Level::High | Level::Medium => {
                let lead = if assessment.risk == Level::High {
                    EMERGENCY_ACTION
                } else {
                    MEDICAL_ATTENTION_ACTION
                };
                actions.push(lead.to_owned());
                if let Some(condition) = top {
                    actions.extend(condition.when_to_seek_care.iter().cloned());
                }
            }
            Level::Low => match top {
                Some(condition) if !condition.self_care_tips.is_empty() => {
                    actions.extend(condition.self_care_tips.iter().cloned());
                }
                _ => actions.extend(GENERIC_SELF_CARE.iter().map(|s| (*s).to_owned())),
            },
        }

        let mut follow_up = vec![MONITOR_FOLLOW_UP.to_owned()];
        if let Some(condition) = top {
            follow_up.push(format!(
                "Follow up with your healthcare provider about {}",
                condition.name
            ));
        }
        if request.duration == DurationBucket::MoreThanTwoWeeks {
            follow_up.push(PERSISTENT_FOLLOW_UP.to_owned());
        }
        if request.age < YOUNG_CHILD_AGE || request.age > OLDER_ADULT_AGE {
            follow_up.push(AGE_FOLLOW_UP.to_owned());
        }

        AnalysisResult {
            analysis_id: stamp.analysis_id,
            timestamp: stamp.timestamp,
            summary,
            possible_conditions: matches.iter().map(|m| m.condition.name.clone()).collect(),
            recommended_actions: dedup_preserving_order(actions),
            emergency_warnings: findings.iter().map(|f| f.message.clone()).collect(),
            confidence_level: assessment.confidence,
            risk_assessment: assessment.risk,
            follow_up_recommendations: follow_up,
            input_data: request.clone(),
        }
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
