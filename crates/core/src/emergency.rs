//! Emergency phrase detection.
//!
//! Runs over the raw request text independently of condition matching. Phrase presence alone
//! is enough to fire a rule; age, gender and duration never suppress a finding.

use crate::constants::{CRITICAL_RECOMMENDATION, MONITOR_FOLLOW_UP, URGENT_RECOMMENDATION};
use crate::knowledge_base::KnowledgeBase;
use crate::model::EmergencyTier;
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A rule that fired, with the phrases that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyFinding {
    pub tier: EmergencyTier,
    pub message: String,
    pub matched_phrases: Vec<String>,
}

/// Outcome of a standalone emergency check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyCheck {
    /// True when a Critical or Urgent rule fired.
    pub is_emergency: bool,
    /// Highest tier fired, or `None` when nothing fired.
    pub urgency_level: Option<EmergencyTier>,
    pub findings: Vec<EmergencyFinding>,
    pub recommendation: String,
}

#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    kb: Arc<KnowledgeBase>,
}

impl EmergencyDetector {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Every rule whose trigger phrases appear in `text`.
    ///
    /// Ordered Critical, Urgent, Warning; catalog order within a tier.
    pub fn detect(&self, text: &str) -> Vec<EmergencyFinding> {
        let text = normalize(text);

        let mut findings: Vec<EmergencyFinding> = self
            .kb
            .emergency_rules()
            .iter()
            .filter_map(|rule| {
                let matched = rule.matching_phrases(&text);
                if matched.is_empty() {
                    return None;
                }
                Some(EmergencyFinding {
                    tier: rule.tier,
                    message: rule.message.clone(),
                    matched_phrases: matched.into_iter().map(str::to_owned).collect(),
                })
            })
            .collect();

        // Stable sort keeps catalog order inside each tier.
        findings.sort_by_key(|f| f.tier);

        if !findings.is_empty() {
            tracing::info!(
                fired = findings.len(),
                highest = ?findings[0].tier,
                "emergency rules fired"
            );
        }
        findings
    }

    /// Run [`detect`](Self::detect) and summarise the result with a recommendation.
    pub fn check(&self, text: &str) -> EmergencyCheck {
        let findings = self.detect(text);
        let urgency_level = findings.first().map(|f| f.tier);
        let is_emergency = matches!(
            urgency_level,
            Some(EmergencyTier::Critical | EmergencyTier::Urgent)
        );
        let recommendation = match urgency_level {
            Some(EmergencyTier::Critical) => CRITICAL_RECOMMENDATION,
            Some(EmergencyTier::Urgent) => URGENT_RECOMMENDATION,
            _ => MONITOR_FOLLOW_UP,
        };

        EmergencyCheck {
            is_emergency,
            urgency_level,
            findings,
            recommendation: recommendation.to_owned(),
        }
    }
}
