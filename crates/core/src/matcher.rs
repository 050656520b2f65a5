//! Keyword scoring of conditions against symptom text.

use crate::knowledge_base::{Condition, KnowledgeBase};
use crate::normalize::{contains_phrase, normalize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One condition that matched at least one keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMatch<'kb> {
    pub condition: &'kb Condition,
    /// `matched_keywords / total keywords`, in `[0, 1]`.
    pub score: f64,
    pub matched_keywords: BTreeSet<&'kb str>,
}

/// Ranked matches plus how many conditions matched before the result cap was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<'kb> {
    pub matches: Vec<ConditionMatch<'kb>>,
    pub total_matched: usize,
}

/// Scores every condition in the knowledge base against normalized input text.
#[derive(Debug, Clone)]
pub struct SymptomMatcher {
    kb: Arc<KnowledgeBase>,
    max_results: usize,
}

impl SymptomMatcher {
    pub fn new(kb: Arc<KnowledgeBase>, max_results: usize) -> Self {
        Self { kb, max_results }
    }

    /// Rank conditions for `symptom_text`, keeping only the top `max_results`.
    ///
    /// An empty vector means nothing matched. See [`rank`](Self::rank).
    pub fn match_conditions(&self, symptom_text: &str) -> Vec<ConditionMatch<'_>> {
        self.rank(symptom_text).matches
    }

    /// Rank conditions for `symptom_text`.
    ///
    /// Each distinct catalog keyword is tested once as a substring of the normalized text, and
    /// the inverted index credits every condition that lists it. Conditions with no matched
    /// keyword are dropped. The result is sorted by [`rank_order`] and truncated to the
    /// configured maximum. `total_matched` counts matches before truncation.
    pub fn rank(&self, symptom_text: &str) -> MatchOutcome<'_> {
        let text = normalize(symptom_text);
        let mut hits: HashMap<usize, BTreeSet<&str>> = HashMap::new();

        for (keyword, indices) in self.kb.keyword_entries() {
            if !contains_phrase(&text, keyword) {
                continue;
            }
            for &idx in indices {
                hits.entry(idx).or_default().insert(keyword);
            }
        }

        let mut matches: Vec<ConditionMatch<'_>> = hits
            .into_iter()
            .map(|(idx, matched_keywords)| {
                let condition = self.kb.condition_at(idx);
                let score =
                    (matched_keywords.len() as f64 / condition.keywords.len() as f64).clamp(0.0, 1.0);
                ConditionMatch {
                    condition,
                    score,
                    matched_keywords,
                }
            })
            .collect();

        matches.sort_by(rank_order);
        let total_matched = matches.len();
        matches.truncate(self.max_results);

        tracing::debug!(
            matched = total_matched,
            returned = matches.len(),
            top = matches.first().map(|m| m.condition.name.as_str()),
            "conditions matched"
        );
        MatchOutcome {
            matches,
            total_matched,
        }
    }
}

/// Total order used for ranking: score descending, then base risk weight descending, then
/// name ascending.
pub fn rank_order(a: &ConditionMatch<'_>, b: &ConditionMatch<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            b.condition
                .base_risk_weight
                .total_cmp(&a.condition.base_risk_weight)
        })
        .then_with(|| a.condition.name.cmp(&b.condition.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
conditions:
  - name: Alpha
    category: other
    base_risk_weight: 0.2
    keywords: [sore throat, cough]
  - name: Beta
    category: other
    base_risk_weight: 0.9
    keywords: [cough, fever]
  - name: Gamma
    category: other
    base_risk_weight: 0.2
    keywords: [fever, chills]
  - name: Delta
    category: other
    base_risk_weight: 0.5
    keywords: [rash, itching, redness, swelling]
"#;

    fn matcher(max: usize) -> SymptomMatcher {
        let kb = KnowledgeBase::from_yaml(CATALOG).expect("catalog");
        SymptomMatcher::new(Arc::new(kb), max)
    }

    fn names(matches: &[ConditionMatch<'_>]) -> Vec<String> {
        matches.iter().map(|m| m.condition.name.clone()).collect()
    }

    #[test]
    fn single_condition_keyword_scores_matched_over_total() {
        let m = matcher(5);
        let matches = m.match_conditions("Red, itchy RASH on my arm since Monday");
        assert_eq!(names(&matches), vec!["Delta"]);
        assert_eq!(matches[0].score, 0.25);
        assert_eq!(matches[0].matched_keywords.iter().copied().collect::<Vec<_>>(), vec!["rash"]);
    }

    #[test]
    fn ties_break_on_weight_then_name() {
        let m = matcher(5);
        // Alpha 1/2, Beta 1/2 (weight 0.9), Gamma 0/2.
        let matches = m.match_conditions("a dry cough all night");
        assert_eq!(names(&matches), vec!["Beta", "Alpha"]);

        // Alpha and Gamma both 1/2 with equal weight: name decides.
        let matches = m.match_conditions("sore throat and chills");
        assert_eq!(names(&matches), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn higher_score_outranks_weight() {
        let m = matcher(5);
        // Alpha 2/2 beats Beta 1/2 even though Beta carries more weight.
        let matches = m.match_conditions("sore throat with a cough and some chills");
        assert_eq!(names(&matches), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(matches[0].score, 1.0);
        assert_eq!(matches[1].score, 0.5);

        let matches = m.match_conditions("cough and fever");
        assert_eq!(names(&matches), vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn no_keywords_yields_empty_list() {
        let m = matcher(5);
        assert!(m.match_conditions("feeling a bit off today").is_empty());
        assert!(m.match_conditions("").is_empty());
    }

    #[test]
    fn multi_word_keywords_need_contiguous_words() {
        let m = matcher(5);
        assert!(m.match_conditions("my throat is sore").is_empty());
    }

    #[test]
    fn results_are_capped_after_sorting() {
        let m = matcher(1);
        let outcome = m.rank("cough and fever and chills");
        assert_eq!(names(&outcome.matches), vec!["Beta"]);
        assert_eq!(outcome.total_matched, 3);
    }

    #[test]
    fn ranking_is_deterministic() {
        let m = matcher(5);
        let text = "cough, fever, chills, sore throat, rash and redness";
        let first = names(&m.match_conditions(text));
        for _ in 0..20 {
            assert_eq!(names(&m.match_conditions(text)), first);
        }
    }
}
