//! Risk and confidence classification.
//!
//! Risk is a fixed rule table evaluated top-down; the first row that applies wins.
//! Confidence only reflects how strongly the text matched and is independent of risk.

use crate::constants::{
    HIGH_CONFIDENCE_MIN_MATCHES, HIGH_CONFIDENCE_SCORE, MEDIUM_CONFIDENCE_SCORE, RISK_MATCH_SCORE,
};
use crate::emergency::EmergencyFinding;
use crate::model::{ConfidenceLevel, DurationBucket, EmergencyTier, Level, RiskLevel, SeverityLevel};

/// Everything the assessor looks at.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentInput<'a> {
    /// Score of the best match, `None` when nothing matched.
    pub top_score: Option<f64>,
    /// Conditions matched before the result cap.
    pub match_count: usize,
    pub severity: SeverityLevel,
    pub duration: DurationBucket,
    pub findings: &'a [EmergencyFinding],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub risk: RiskLevel,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessor;

impl RiskAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, input: &AssessmentInput<'_>) -> Assessment {
        Assessment {
            risk: self.risk(input),
            confidence: self.confidence(input),
        }
    }

    pub fn risk(&self, input: &AssessmentInput<'_>) -> RiskLevel {
        let fired = |tier: EmergencyTier| input.findings.iter().any(|f| f.tier == tier);
        let top_score = input.top_score.unwrap_or(0.0);

        if fired(EmergencyTier::Critical) {
            return Level::High;
        }
        if fired(EmergencyTier::Urgent) || input.severity == SeverityLevel::Severe {
            return Level::High;
        }
        if (input.severity == SeverityLevel::Moderate
            && input.duration >= DurationBucket::OneToTwoWeeks)
            || fired(EmergencyTier::Warning)
        {
            return Level::Medium;
        }
        if top_score >= RISK_MATCH_SCORE && input.severity >= SeverityLevel::Moderate {
            return Level::Medium;
        }
        Level::Low
    }

    pub fn confidence(&self, input: &AssessmentInput<'_>) -> ConfidenceLevel {
        match input.top_score {
            Some(score)
                if score >= HIGH_CONFIDENCE_SCORE
                    && input.match_count >= HIGH_CONFIDENCE_MIN_MATCHES =>
            {
                Level::High
            }
            Some(score) if score >= MEDIUM_CONFIDENCE_SCORE => Level::Medium,
            _ => Level::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(tier: EmergencyTier) -> EmergencyFinding {
        EmergencyFinding {
            tier,
            message: format!("{tier:?}"),
            matched_phrases: vec![],
        }
    }

    fn input<'a>(
        top_score: Option<f64>,
        match_count: usize,
        severity: SeverityLevel,
        duration: DurationBucket,
        findings: &'a [EmergencyFinding],
    ) -> AssessmentInput<'a> {
        AssessmentInput {
            top_score,
            match_count,
            severity,
            duration,
            findings,
        }
    }

    #[test]
    fn critical_finding_is_high_whatever_the_severity() {
        let findings = [finding(EmergencyTier::Critical)];
        let a = RiskAssessor::new();
        for severity in [SeverityLevel::Mild, SeverityLevel::Moderate, SeverityLevel::Severe] {
            let i = input(None, 0, severity, DurationBucket::LessThan24Hours, &findings);
            assert_eq!(a.risk(&i), Level::High);
        }
    }

    #[test]
    fn urgent_finding_or_severe_is_high() {
        let a = RiskAssessor::new();
        let urgent = [finding(EmergencyTier::Urgent)];
        let i = input(None, 0, SeverityLevel::Mild, DurationBucket::OneToThreeDays, &urgent);
        assert_eq!(a.risk(&i), Level::High);

        let i = input(None, 0, SeverityLevel::Severe, DurationBucket::OneToThreeDays, &[]);
        assert_eq!(a.risk(&i), Level::High);
    }

    #[test]
    fn long_moderate_or_warning_is_medium() {
        let a = RiskAssessor::new();
        let i = input(None, 0, SeverityLevel::Moderate, DurationBucket::OneToTwoWeeks, &[]);
        assert_eq!(a.risk(&i), Level::Medium);
        let i = input(None, 0, SeverityLevel::Moderate, DurationBucket::MoreThanTwoWeeks, &[]);
        assert_eq!(a.risk(&i), Level::Medium);
        let i = input(None, 0, SeverityLevel::Moderate, DurationBucket::FourToSevenDays, &[]);
        assert_eq!(a.risk(&i), Level::Low);

        let warning = [finding(EmergencyTier::Warning)];
        let i = input(None, 0, SeverityLevel::Mild, DurationBucket::LessThan24Hours, &warning);
        assert_eq!(a.risk(&i), Level::Medium);
    }

    #[test]
    fn strong_match_needs_moderate_severity_for_medium() {
        let a = RiskAssessor::new();
        let i = input(Some(0.5), 1, SeverityLevel::Moderate, DurationBucket::OneToThreeDays, &[]);
        assert_eq!(a.risk(&i), Level::Medium);
        let i = input(Some(0.49), 1, SeverityLevel::Moderate, DurationBucket::OneToThreeDays, &[]);
        assert_eq!(a.risk(&i), Level::Low);
        let i = input(Some(1.0), 1, SeverityLevel::Mild, DurationBucket::MoreThanTwoWeeks, &[]);
        assert_eq!(a.risk(&i), Level::Low);
    }

    #[test]
    fn confidence_thresholds() {
        let a = RiskAssessor::new();
        let d = DurationBucket::OneToThreeDays;
        let s = SeverityLevel::Mild;
        assert_eq!(a.confidence(&input(Some(0.75), 2, s, d, &[])), Level::High);
        assert_eq!(a.confidence(&input(Some(0.75), 1, s, d, &[])), Level::Medium);
        assert_eq!(a.confidence(&input(Some(0.4), 3, s, d, &[])), Level::Medium);
        assert_eq!(a.confidence(&input(Some(0.39), 3, s, d, &[])), Level::Low);
        assert_eq!(a.confidence(&input(None, 0, s, d, &[])), Level::Low);
    }

    #[test]
    fn confidence_is_independent_of_risk() {
        let critical = [finding(EmergencyTier::Critical)];
        let i = input(Some(0.2), 1, SeverityLevel::Mild, DurationBucket::LessThan24Hours, &critical);
        let result = RiskAssessor::new().assess(&i);
        assert_eq!(
            result,
            Assessment {
                risk: Level::High,
                confidence: Level::Low
            }
        );
    }
}
