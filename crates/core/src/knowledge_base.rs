//! Condition and emergency-rule catalog.
//!
//! The catalog is declarative YAML: a list of conditions and a list of emergency rules. It is
//! parsed once at startup into a [`KnowledgeBase`], which owns normalized copies of every
//! phrase plus an inverted index from keyword to conditions. After construction nothing
//! mutates it, so it is shared across requests behind an `Arc` with no locking.
//!
//! Loading is strict. Any structural defect (unknown category, duplicate condition, empty
//! keyword set, ...) is a [`CatalogError`] and the process must not start.

use crate::constants::GENERAL_HEALTH_TIPS;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Category, EmergencyTier};
use crate::normalize::{contains_phrase, normalize};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

/// The catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../catalog/catalog.yaml");

/// A named condition with its keywords and guidance.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub name: String,
    pub category: Category,
    /// Normalized, unique, in catalog order.
    pub keywords: Vec<String>,
    pub base_risk_weight: f64,
    pub self_care_tips: Vec<String>,
    pub when_to_seek_care: Vec<String>,
}

/// A set of alarming phrases and the warning to show when any of them appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyRule {
    /// Normalized, in catalog order.
    pub trigger_phrases: Vec<String>,
    pub tier: EmergencyTier,
    pub message: String,
}

impl EmergencyRule {
    /// Trigger phrases present in already-normalized `text`.
    pub fn matching_phrases<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.trigger_phrases
            .iter()
            .filter(|phrase| contains_phrase(text, phrase))
            .map(String::as_str)
            .collect()
    }
}

/// Immutable, indexed view of the catalog.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
    emergency_rules: Vec<EmergencyRule>,
    keyword_index: HashMap<String, Vec<usize>>,
    name_index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Build the knowledge base from the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded catalog is malformed.
    pub fn load_catalog() -> CatalogResult<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Build the knowledge base from a catalog file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FileRead`] if the file cannot be read, or any validation error
    /// raised by [`KnowledgeBase::from_yaml`].
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parse and validate catalog YAML.
    ///
    /// Uses `serde_path_to_error` so schema mismatches (for example an unknown category)
    /// report the path of the failing field.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the YAML does not match the catalog schema,
    /// - there are no conditions,
    /// - two conditions share a (normalized) name,
    /// - a condition has no keywords, an empty keyword or a repeated keyword,
    /// - a base risk weight is negative or not finite,
    /// - an emergency rule has no trigger phrases, an empty phrase or an empty message.
    pub fn from_yaml(yaml_text: &str) -> CatalogResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(CatalogError::Schema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        let kb = Self::from_wire(wire)?;
        tracing::info!(
            conditions = kb.conditions.len(),
            emergency_rules = kb.emergency_rules.len(),
            keywords = kb.keyword_index.len(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    fn from_wire(wire: CatalogWire) -> CatalogResult<Self> {
        if wire.conditions.is_empty() {
            return Err(CatalogError::NoConditions);
        }

        let mut conditions = Vec::with_capacity(wire.conditions.len());
        let mut name_index = HashMap::new();
        let mut keyword_index: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, cw) in wire.conditions.into_iter().enumerate() {
            let name = cw.name.trim().to_owned();
            let key = normalize(&name);
            if key.is_empty() {
                return Err(CatalogError::EmptyConditionName(idx));
            }
            if name_index.insert(key, idx).is_some() {
                return Err(CatalogError::DuplicateCondition(name));
            }
            if cw.keywords.is_empty() {
                return Err(CatalogError::EmptyKeywords(name));
            }
            if !cw.base_risk_weight.is_finite() || cw.base_risk_weight < 0.0 {
                return Err(CatalogError::InvalidRiskWeight(name));
            }

            let mut seen = HashSet::new();
            let mut keywords = Vec::with_capacity(cw.keywords.len());
            for raw in &cw.keywords {
                let keyword = normalize(raw);
                if keyword.is_empty() {
                    return Err(CatalogError::EmptyKeyword {
                        condition: name,
                        keyword: raw.clone(),
                    });
                }
                if !seen.insert(keyword.clone()) {
                    return Err(CatalogError::DuplicateKeyword {
                        condition: name,
                        keyword,
                    });
                }
                keyword_index.entry(keyword.clone()).or_default().push(idx);
                keywords.push(keyword);
            }

            conditions.push(Condition {
                name,
                category: cw.category,
                keywords,
                base_risk_weight: cw.base_risk_weight,
                self_care_tips: cw.self_care_tips,
                when_to_seek_care: cw.when_to_seek_care,
            });
        }

        let mut emergency_rules = Vec::with_capacity(wire.emergency_rules.len());
        for (index, rw) in wire.emergency_rules.into_iter().enumerate() {
            if rw.trigger_phrases.is_empty() {
                return Err(CatalogError::EmptyTriggers(index));
            }
            let message = rw.message.trim().to_owned();
            if message.is_empty() {
                return Err(CatalogError::EmptyMessage(index));
            }
            let mut seen = HashSet::new();
            let mut trigger_phrases = Vec::with_capacity(rw.trigger_phrases.len());
            for raw in rw.trigger_phrases {
                let phrase = normalize(&raw);
                if phrase.is_empty() {
                    return Err(CatalogError::EmptyTrigger { index, phrase: raw });
                }
                if !seen.insert(phrase.clone()) {
                    return Err(CatalogError::DuplicateTrigger { index, phrase });
                }
                trigger_phrases.push(phrase);
            }
            emergency_rules.push(EmergencyRule {
                trigger_phrases,
                tier: rw.tier,
                message,
            });
        }

        Ok(Self {
            conditions,
            emergency_rules,
            keyword_index,
            name_index,
        })
    }

    /// All conditions in catalog order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// All emergency rules in catalog order.
    pub fn emergency_rules(&self) -> &[EmergencyRule] {
        &self.emergency_rules
    }

    /// Look a condition up by name, ignoring case and punctuation.
    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.name_index
            .get(&normalize(name))
            .map(|&idx| &self.conditions[idx])
    }

    /// Conditions that list `token` as a keyword, in catalog order.
    ///
    /// The token is normalized first; an unknown token yields an empty list.
    pub fn find_conditions_by_keyword(&self, token: &str) -> Vec<&Condition> {
        self.keyword_index
            .get(&normalize(token))
            .map(|indices| indices.iter().map(|&idx| &self.conditions[idx]).collect())
            .unwrap_or_default()
    }

    /// Every distinct keyword with the indices of the conditions that use it.
    pub(crate) fn keyword_entries(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keyword_index
            .iter()
            .map(|(keyword, indices)| (keyword.as_str(), indices.as_slice()))
    }

    pub(crate) fn condition_at(&self, idx: usize) -> &Condition {
        &self.conditions[idx]
    }

    /// Sorted, de-duplicated keywords across all conditions, for autocomplete.
    pub fn common_symptoms(&self) -> Vec<String> {
        self.conditions
            .iter()
            .flat_map(|c| c.keywords.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Conditions whose name or any keyword contains `query`, in catalog order.
    ///
    /// Uses the same normalization as matching. An empty normalized query matches nothing.
    pub fn search_conditions(&self, query: &str, limit: usize) -> Vec<&Condition> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }

        self.conditions
            .iter()
            .filter(|c| {
                normalize(&c.name).contains(&needle)
                    || c.keywords.iter().any(|k| k.contains(&needle))
            })
            .take(limit)
            .collect()
    }

    /// Condition-specific self-care tips followed by general tips.
    ///
    /// Unknown or absent conditions get only the general tips.
    pub fn health_tips(&self, condition: Option<&str>) -> Vec<String> {
        let mut tips: Vec<String> = condition
            .and_then(|name| self.condition(name))
            .map(|c| c.self_care_tips.clone())
            .unwrap_or_default();
        tips.extend(GENERAL_HEALTH_TIPS.iter().map(|t| (*t).to_owned()));
        tips
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    conditions: Vec<ConditionWire>,
    #[serde(default)]
    emergency_rules: Vec<EmergencyRuleWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    name: String,
    category: Category,
    base_risk_weight: f64,
    keywords: Vec<String>,
    #[serde(default)]
    self_care_tips: Vec<String>,
    #[serde(default)]
    when_to_seek_care: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmergencyRuleWire {
    tier: EmergencyTier,
    message: String,
    trigger_phrases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#"
conditions:
  - name: Migraine
    category: neurological
    base_risk_weight: 0.4
    keywords: [Headache, "Sensitivity to light"]
    self_care_tips: [Rest in a dark room]
  - name: Common Cold
    category: respiratory
    base_risk_weight: 0.1
    keywords: [cough, headache]
emergency_rules:
  - tier: critical
    message: Call now.
    trigger_phrases: [Chest-Pain]
"#;

    #[test]
    fn embedded_catalog_loads() {
        let kb = KnowledgeBase::load_catalog().expect("embedded catalog must be valid");
        assert!(kb.conditions().len() >= 20);
        assert!(!kb.emergency_rules().is_empty());

        let categories: HashSet<Category> = kb.conditions().iter().map(|c| c.category).collect();
        for category in Category::ALL {
            assert!(categories.contains(&category), "no condition in {category:?}");
        }
    }

    #[test]
    fn keywords_and_triggers_are_normalized() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");
        let migraine = kb.condition("migraine").expect("lookup ignores case");
        assert_eq!(migraine.keywords, vec!["headache", "sensitivity to light"]);
        assert_eq!(kb.emergency_rules()[0].trigger_phrases, vec!["chest pain"]);
    }

    #[test]
    fn keyword_lookup_returns_every_condition_in_catalog_order() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");
        let names: Vec<&str> = kb
            .find_conditions_by_keyword("HEADACHE!")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Migraine", "Common Cold"]);
        assert!(kb.find_conditions_by_keyword("fever").is_empty());
    }

    #[test]
    fn rejects_unknown_category_with_path() {
        let input = SMALL.replace("category: respiratory", "category: pulmonary");
        let err = KnowledgeBase::from_yaml(&input).expect_err("unknown category");
        match err {
            CatalogError::Schema { path, .. } => assert!(path.contains("category"), "{path}"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let input = SMALL.replace("base_risk_weight: 0.1", "base_risk_weight: 0.1\n    colour: red");
        let err = KnowledgeBase::from_yaml(&input).expect_err("unknown key");
        assert!(matches!(err, CatalogError::Schema { .. }));
    }

    #[test]
    fn rejects_duplicate_condition_names() {
        let input = SMALL.replace("name: Common Cold", "name: MIGRAINE");
        let err = KnowledgeBase::from_yaml(&input).expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateCondition(name) if name == "MIGRAINE"));
    }

    #[test]
    fn rejects_blank_condition_name() {
        let input = SMALL.replace("name: Common Cold", "name: \"  \"");
        let err = KnowledgeBase::from_yaml(&input).expect_err("blank name");
        assert!(matches!(err, CatalogError::EmptyConditionName(1)));

        let input = SMALL.replace("name: Migraine", "name: \"--\"");
        let err = KnowledgeBase::from_yaml(&input).expect_err("punctuation-only name");
        assert!(matches!(err, CatalogError::EmptyConditionName(0)));
    }

    #[test]
    fn rejects_trigger_phrase_repeated_after_normalization() {
        let input = SMALL.replace(
            "trigger_phrases: [Chest-Pain]",
            "trigger_phrases: [Chest-Pain, \"chest pain!\"]",
        );
        let err = KnowledgeBase::from_yaml(&input).expect_err("duplicate trigger");
        assert!(
            matches!(err, CatalogError::DuplicateTrigger { index: 0, phrase } if phrase == "chest pain")
        );
    }

    #[test]
    fn rejects_empty_keyword_set() {
        let input = SMALL.replace("keywords: [cough, headache]", "keywords: []");
        let err = KnowledgeBase::from_yaml(&input).expect_err("empty keywords");
        assert!(matches!(err, CatalogError::EmptyKeywords(name) if name == "Common Cold"));
    }

    #[test]
    fn rejects_keyword_that_normalizes_to_nothing() {
        let input = SMALL.replace("keywords: [cough, headache]", "keywords: [cough, \"--\"]");
        let err = KnowledgeBase::from_yaml(&input).expect_err("empty keyword");
        assert!(matches!(err, CatalogError::EmptyKeyword { .. }));
    }

    #[test]
    fn rejects_keywords_repeated_after_normalization() {
        let input = SMALL.replace("keywords: [cough, headache]", "keywords: [cough, Cough!]");
        let err = KnowledgeBase::from_yaml(&input).expect_err("duplicate keyword");
        assert!(matches!(err, CatalogError::DuplicateKeyword { keyword, .. } if keyword == "cough"));
    }

    #[test]
    fn rejects_negative_weight() {
        let input = SMALL.replace("base_risk_weight: 0.1", "base_risk_weight: -1.0");
        let err = KnowledgeBase::from_yaml(&input).expect_err("negative weight");
        assert!(matches!(err, CatalogError::InvalidRiskWeight(_)));
    }

    #[test]
    fn rejects_empty_catalog_and_bad_rules() {
        let err = KnowledgeBase::from_yaml("conditions: []").expect_err("no conditions");
        assert!(matches!(err, CatalogError::NoConditions));

        let input = SMALL.replace("trigger_phrases: [Chest-Pain]", "trigger_phrases: []");
        let err = KnowledgeBase::from_yaml(&input).expect_err("no triggers");
        assert!(matches!(err, CatalogError::EmptyTriggers(0)));

        let input = SMALL.replace("message: Call now.", "message: \"  \"");
        let err = KnowledgeBase::from_yaml(&input).expect_err("empty message");
        assert!(matches!(err, CatalogError::EmptyMessage(0)));
    }

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SMALL.as_bytes()).expect("write catalog");

        let kb = KnowledgeBase::from_path(file.path()).expect("load from path");
        assert_eq!(kb.conditions().len(), 2);

        let missing = file.path().with_extension("missing");
        let err = KnowledgeBase::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, CatalogError::FileRead { .. }));
    }

    #[test]
    fn common_symptoms_are_sorted_and_unique() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");
        assert_eq!(
            kb.common_symptoms(),
            vec!["cough", "headache", "sensitivity to light"]
        );
    }

    #[test]
    fn search_matches_names_and_keywords() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");

        let by_name: Vec<&str> = kb.search_conditions("COLD", 10).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(by_name, vec!["Common Cold"]);

        let by_keyword = kb.search_conditions("head", 10);
        assert_eq!(by_keyword.len(), 2);
        assert_eq!(kb.search_conditions("head", 1).len(), 1);
        assert!(kb.search_conditions("  ?? ", 10).is_empty());
    }

    #[test]
    fn health_tips_prefix_condition_advice() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");

        let tips = kb.health_tips(Some("migraine"));
        assert_eq!(tips[0], "Rest in a dark room");
        assert_eq!(tips.len(), 1 + GENERAL_HEALTH_TIPS.len());

        assert_eq!(kb.health_tips(None).len(), GENERAL_HEALTH_TIPS.len());
        assert_eq!(kb.health_tips(Some("unknown")).len(), GENERAL_HEALTH_TIPS.len());
    }

    #[test]
    fn rule_reports_matching_phrases() {
        let kb = KnowledgeBase::from_yaml(SMALL).expect("parse");
        let rule = &kb.emergency_rules()[0];
        assert_eq!(rule.matching_phrases("sudden chest pain today"), vec!["chest pain"]);
        assert!(rule.matching_phrases("chest tightness").is_empty());
    }
}
