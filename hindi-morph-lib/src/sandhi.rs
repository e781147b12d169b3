// Sandhi reversal at the stem/suffix boundary.
//
// Every rule is read strictly as "left + right surfaces as contracted". Two
// boundary shapes are recognised:
//   1. the stem still ends with the rule's left vowel and the suffix begins
//      with its right vowel (the boundary key itself is present);
//   2. the stem ends with the contracted form and the suffix begins with the
//      right vowel, in which case the contracted tail is replaced by the left
//      vowel.
// Rules flagged as non-reversible at load time are never used.

use log::debug;

use crate::normalize::{independent_vowel, is_nasal_mark};
use crate::rules::{RuleStore, SandhiRule, SANDHI_DELIMITER};
use crate::types::SandhiAdjustment;

/// Outcome of boundary inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandhiResolution {
    pub adjusted_stem: String,
    /// Present when a rule fired.
    pub adjustment: Option<SandhiAdjustment>,
}

impl SandhiResolution {
    pub fn applied(&self) -> bool {
        self.adjustment.is_some()
    }

    fn unchanged(stem: &str) -> Self {
        SandhiResolution {
            adjusted_stem: stem.to_string(),
            adjustment: None,
        }
    }
}

/// Inspect the `stem`/`suffix` boundary and undo a contraction recorded in
/// the sandhi table.
pub fn resolve_sandhi(stem: &str, suffix: &str, rules: &RuleStore) -> SandhiResolution {
    let (Some(left), Some(right)) = (stem_vowel(stem), suffix.chars().next()) else {
        return SandhiResolution::unchanged(stem);
    };
    let (core, marks) = split_trailing_marks(stem);

    // Shape 1: the boundary key is spelled out at the junction.
    for l in spellings(left) {
        for r in spellings(right) {
            let key = format!("{l}{SANDHI_DELIMITER}{r}");
            let Some(rule) = rules.sandhi_rule(&key) else {
                continue;
            };
            if !rule.reversible {
                debug!("sandhi rule {key:?} matched but is flagged; not reversing");
                continue;
            }
            let adjusted = match core.strip_suffix(rule.contracted.as_str()) {
                Some(head) => format!("{head}{}{marks}", rule.left),
                None => stem.to_string(),
            };
            if let Some(resolution) = applied(stem, adjusted, rule) {
                return resolution;
            }
        }
    }

    // Shape 2: the stem carries the contracted form.
    let right_forms: Vec<String> = spellings(right).collect();
    for rule in rules.sandhi_rules() {
        if !rule.reversible || !right_forms.contains(&rule.right) {
            continue;
        }
        if let Some(head) = core.strip_suffix(rule.contracted.as_str()) {
            let adjusted = format!("{head}{}{marks}", rule.left);
            if let Some(resolution) = applied(stem, adjusted, rule) {
                return resolution;
            }
        }
    }

    SandhiResolution::unchanged(stem)
}

fn applied(stem: &str, adjusted: String, rule: &SandhiRule) -> Option<SandhiResolution> {
    if adjusted.is_empty() {
        return None;
    }
    debug!(
        "sandhi {} -> {}: {stem:?} becomes {adjusted:?}",
        rule.key, rule.contracted
    );
    Some(SandhiResolution {
        adjustment: Some(SandhiAdjustment {
            boundary_before: rule.key.clone(),
            boundary_after: rule.contracted.clone(),
            stem_before: stem.to_string(),
            stem_after: adjusted.clone(),
        }),
        adjusted_stem: adjusted,
    })
}

/// The stem's last vowel-bearing character, skipping nasalisation marks.
fn stem_vowel(stem: &str) -> Option<char> {
    stem.chars().rev().find(|c| !is_nasal_mark(*c))
}

/// Split trailing nasalisation marks off the stem.
fn split_trailing_marks(stem: &str) -> (&str, &str) {
    let cut = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_nasal_mark(*c))
        .last()
        .map_or(stem.len(), |(i, _)| i);
    stem.split_at(cut)
}

/// A vowel as written (sign or letter), followed by its independent letter
/// when it is a sign.
fn spellings(c: char) -> impl Iterator<Item = String> {
    std::iter::once(c)
        .chain(independent_vowel(c))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> RuleStore {
        RuleStore::from_document(&json!({
            "sandhi_rules": {
                "ा+इ": "े",
                "ि+आ": "ी",
                "ु+अ": "्व"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_no_rule_for_boundary() {
        let r = rules();
        let res = resolve_sandhi("लड़क", "ों", &r);
        assert!(!res.applied());
        assert_eq!(res.adjusted_stem, "लड़क");
    }

    #[test]
    fn test_boundary_key_detected() {
        let r = rules();
        // Stem ends in the pre-contraction "ा", suffix starts with "इ".
        let res = resolve_sandhi("बेटा", "इयाँ", &r);
        assert!(res.applied());
        assert_eq!(res.adjusted_stem, "बेटा");
        let adj = res.adjustment.unwrap();
        assert_eq!(adj.boundary_before, "ा+इ");
        assert_eq!(adj.boundary_after, "े");
    }

    #[test]
    fn test_vowel_sign_matches_independent_key() {
        let r = rules();
        // "ि" at the start of the suffix is looked up as "इ".
        let res = resolve_sandhi("बेटा", "ियाँ", &r);
        assert!(res.applied());
        assert_eq!(res.adjustment.unwrap().boundary_before, "ा+इ");
    }

    #[test]
    fn test_contracted_tail_reversed() {
        let r = rules();
        // Stem carries the contracted "े"; suffix starts with "इ".
        let res = resolve_sandhi("गणे", "इश", &r);
        assert!(res.applied());
        assert_eq!(res.adjusted_stem, "गणा");
        let adj = res.adjustment.unwrap();
        assert_eq!(adj.stem_before, "गणे");
        assert_eq!(adj.stem_after, "गणा");
    }

    #[test]
    fn test_nasal_mark_kept_after_reversal() {
        let r = rules();
        let res = resolve_sandhi("नदीं", "आँ", &r);
        assert_eq!(res.adjusted_stem, "नदिं");
    }

    #[test]
    fn test_flagged_rule_not_reversed() {
        let r = rules();
        let res = resolve_sandhi("गु", "अर", &r);
        assert!(!res.applied());
        assert_eq!(res.adjusted_stem, "गु");
        let res = resolve_sandhi("स्व", "अगत", &r);
        assert!(!res.applied());
    }

    #[test]
    fn test_empty_inputs() {
        let r = rules();
        assert!(!resolve_sandhi("", "ों", &r).applied());
        assert!(!resolve_sandhi("घर", "", &r).applied());
    }

    #[test]
    fn test_whole_stem_contracted() {
        let r = RuleStore::from_document(&json!({ "sandhi_rules": { "ा+इ": "ए" } })).unwrap();
        let res = resolve_sandhi("ए", "इ", &r);
        assert_eq!(res.adjusted_stem, "ा");
    }
}
