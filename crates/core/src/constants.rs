//! Constants used throughout the symcheck core crate.
//!
//! Thresholds, caps and fixed guidance strings live here so the scoring code and its tests
//! agree on the same values.

/// Default number of ranked conditions returned by the matcher.
pub const DEFAULT_MAX_CONDITIONS: usize = 5;

/// Default number of results returned by condition search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Top match score at or above which a moderate-or-worse presentation is Medium risk.
pub const RISK_MATCH_SCORE: f64 = 0.5;

/// Top match score required for High confidence.
pub const HIGH_CONFIDENCE_SCORE: f64 = 0.75;

/// Number of matched conditions required for High confidence.
pub const HIGH_CONFIDENCE_MIN_MATCHES: usize = 2;

/// Top match score required for Medium confidence.
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 0.4;

/// Ages below this are flagged for prompt follow-up.
pub const YOUNG_CHILD_AGE: u8 = 5;

/// Ages above this are flagged for prompt follow-up.
pub const OLDER_ADULT_AGE: u8 = 65;

/// Lead action when risk is High.
pub const EMERGENCY_ACTION: &str = "Seek emergency care immediately";

/// Lead action when risk is Medium.
pub const MEDICAL_ATTENTION_ACTION: &str = "Consider seeking medical attention today";

/// Summary used when no condition matched.
pub const NO_MATCH_SUMMARY: &str =
    "Analysis could not identify a specific condition; please consult a healthcare provider";

/// Self-care guidance used when no condition matched.
pub const GENERIC_SELF_CARE: &[&str] = &[
    "Get adequate rest",
    "Stay hydrated",
    "Monitor symptoms for changes",
    "Avoid known triggers or irritants",
];

/// General health tips appended to condition-specific tips.
pub const GENERAL_HEALTH_TIPS: &[&str] = &[
    "Maintain a healthy diet and regular exercise routine",
    "Get adequate sleep (7-9 hours per night)",
    "Stay hydrated by drinking plenty of water",
    "Practice good hygiene and handwashing",
    "Schedule regular check-ups with your healthcare provider",
    "Avoid smoking and limit alcohol consumption",
    "Manage stress through relaxation techniques",
];

pub const MONITOR_FOLLOW_UP: &str = "Monitor symptoms and seek care if they worsen";

pub const PERSISTENT_FOLLOW_UP: &str = "Persistent symptoms may require medical evaluation";

pub const AGE_FOLLOW_UP: &str =
    "Young children and adults over 65 should contact a healthcare provider promptly";

pub const CRITICAL_RECOMMENDATION: &str =
    "Call emergency services immediately or go to the nearest emergency room";

pub const URGENT_RECOMMENDATION: &str = "Seek medical attention within 24 hours";
