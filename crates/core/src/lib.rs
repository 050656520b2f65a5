//! # symcheck core
//!
//! Symptom analysis engine.
//!
//! This crate turns a validated [`AnalysisRequest`] into an [`AnalysisResult`]:
//! - [`knowledge_base`]: the immutable condition and emergency-rule catalog
//! - [`matcher`]: keyword scoring and ranking of conditions
//! - [`emergency`]: emergency phrase detection
//! - [`assessment`]: risk and confidence classification
//! - [`composer`]: assembly of the final result
//!
//! Everything here is pure in-memory computation. **No API concerns**: request validation,
//! HTTP and CLI live in `api-shared`, `api-rest` and `symcheck-cli`.

pub mod assessment;
pub mod composer;
pub mod config;
pub mod constants;
pub mod emergency;
pub mod error;
pub mod knowledge_base;
pub mod matcher;
pub mod model;
pub mod normalize;

pub use assessment::{Assessment, AssessmentInput, RiskAssessor};
pub use composer::{AnalysisStamp, ResultComposer};
pub use config::CoreConfig;
pub use emergency::{EmergencyCheck, EmergencyDetector, EmergencyFinding};
pub use error::{CatalogError, CatalogResult, ConfigError, ConfigResult};
pub use knowledge_base::{Condition, EmergencyRule, KnowledgeBase};
pub use matcher::{ConditionMatch, MatchOutcome, SymptomMatcher};
pub use model::{
    AnalysisRequest, AnalysisResult, Category, ConfidenceLevel, DurationBucket, EmergencyTier,
    Gender, Level, ParseEnumError, RiskLevel, SeverityLevel,
};

use chrono::Utc;
use std::sync::Arc;

/// Symptom analysis facade wiring the engine components around one shared knowledge base.
///
/// Cheap to clone; clones share the same catalog.
#[derive(Clone, Debug)]
pub struct SymptomService {
    kb: Arc<KnowledgeBase>,
    matcher: SymptomMatcher,
    detector: EmergencyDetector,
    assessor: RiskAssessor,
    composer: ResultComposer,
    search_limit: usize,
}

impl SymptomService {
    /// Creates a service over an already-loaded knowledge base.
    pub fn new(kb: Arc<KnowledgeBase>, cfg: &CoreConfig) -> Self {
        Self {
            matcher: SymptomMatcher::new(kb.clone(), cfg.max_conditions()),
            detector: EmergencyDetector::new(kb.clone()),
            assessor: RiskAssessor::new(),
            composer: ResultComposer::new(),
            search_limit: cfg.search_limit(),
            kb,
        }
    }

    /// Loads the catalog named by `cfg` (or the embedded one) and builds the service.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read or is malformed. Callers should
    /// treat this as fatal.
    pub fn from_config(cfg: &CoreConfig) -> CatalogResult<Self> {
        let kb = match cfg.catalog_path() {
            Some(path) => {
                tracing::info!("loading catalog from {}", path.display());
                KnowledgeBase::from_path(path)?
            }
            None => KnowledgeBase::load_catalog()?,
        };
        Ok(Self::new(Arc::new(kb), cfg))
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Analyse one validated request.
    ///
    /// Never fails: a request that matches nothing produces a generic low-confidence result.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let MatchOutcome {
            matches,
            total_matched,
        } = self.matcher.rank(&request.symptom_text);
        let findings = self.detector.detect(&request.symptom_text);

        // Confidence looks at every match, not just the ones kept for display.
        let assessment = self.assessor.assess(&AssessmentInput {
            top_score: matches.first().map(|m| m.score),
            match_count: total_matched,
            severity: request.severity,
            duration: request.duration,
            findings: &findings,
        });

        let stamp = AnalysisStamp {
            analysis_id: format!("analysis_{}", uuid::Uuid::new_v4().simple()),
            timestamp: Utc::now(),
        };

        let result = self
            .composer
            .compose(stamp, request, &matches, &findings, assessment);

        tracing::info!(
            analysis_id = %result.analysis_id,
            conditions = result.possible_conditions.len(),
            risk = %result.risk_assessment,
            confidence = %result.confidence_level,
            "symptom analysis completed"
        );
        result
    }

    /// Run only the emergency detector over free text.
    pub fn check_emergency(&self, text: &str) -> EmergencyCheck {
        self.detector.check(text)
    }

    pub fn common_symptoms(&self) -> Vec<String> {
        self.kb.common_symptoms()
    }

    /// Search conditions by name or keyword, capped at the configured limit.
    pub fn search_conditions(&self, query: &str) -> Vec<&Condition> {
        self.kb.search_conditions(query, self.search_limit)
    }

    pub fn health_tips(&self, condition: Option<&str>) -> Vec<String> {
        self.kb.health_tips(condition)
    }
}
