use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Feature keys a rule or dictionary entry may carry, in display order.
pub const FEATURE_KEYS: &[&str] = &[
    "category",
    "gender",
    "number",
    "case",
    "tense",
    "aspect",
    "person",
    "mood",
    "formality",
    "form",
];

/// Grammatical features contributed by a suffix rule, a dictionary entry or an
/// exception record. Every field is optional; absent fields are simply not
/// asserted by the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBundle {
    /// Lexical category (e.g., "noun", "verb", "adjective").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Direct / oblique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<String>,
    /// Non-finite form (e.g., "infinitive").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
}

impl FeatureBundle {
    fn slot(&self, key: &str) -> Option<&Option<String>> {
        Some(match key {
            "category" => &self.category,
            "gender" => &self.gender,
            "number" => &self.number,
            "case" => &self.case,
            "tense" => &self.tense,
            "aspect" => &self.aspect,
            "person" => &self.person,
            "mood" => &self.mood,
            "formality" => &self.formality,
            "form" => &self.form,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        Some(match key {
            "category" => &mut self.category,
            "gender" => &mut self.gender,
            "number" => &mut self.number,
            "case" => &mut self.case,
            "tense" => &mut self.tense,
            "aspect" => &mut self.aspect,
            "person" => &mut self.person,
            "mood" => &mut self.mood,
            "formality" => &mut self.formality,
            "form" => &mut self.form,
            _ => return None,
        })
    }

    /// Value of a named feature, if the key is known and the feature is set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slot(key)?.as_deref()
    }

    /// Set a named feature. Returns false (and changes nothing) for keys
    /// outside [`FEATURE_KEYS`].
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Overlay every feature `other` sets on top of `self`.
    pub fn merge_from(&mut self, other: &FeatureBundle) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Iterate over the features that are set, in [`FEATURE_KEYS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FEATURE_KEYS
            .iter()
            .filter_map(move |&k| self.get(k).map(|v| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn is_verb(&self) -> bool {
        self.category.as_deref() == Some("verb")
    }
}

/// Meaning and type of a prefix rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixInfo {
    pub meaning: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Lexical metadata for a dictionary root (or an exception's pre-resolved root).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootInfo {
    #[serde(flatten)]
    pub features: FeatureBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    /// Usage example, when the source lexicon has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Surface forms the lexicon recorded for this root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_forms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Any other string-valued lexical attribute.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl RootInfo {
    pub fn category(&self) -> Option<&str> {
        self.features.category.as_deref()
    }
}

/// A pre-resolved analysis for a word that regular rules cannot derive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub original: String,
    pub normalized: String,
    pub root: String,
    pub root_info: Option<RootInfo>,
}

/// The prefix rule that matched a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMatch {
    pub prefix: String,
    pub meaning: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The suffix rule that matched a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixMatch {
    pub suffix: String,
    pub features: FeatureBundle,
}

/// A sandhi contraction undone at the stem/suffix boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandhiAdjustment {
    /// Pre-contraction boundary, i.e. the rule key (e.g., "ा+इ").
    pub boundary_before: String,
    /// Contracted surface form (e.g., "े").
    pub boundary_after: String,
    /// Stem as it came out of affix stripping.
    pub stem_before: String,
    /// Stem with the contraction reversed.
    pub stem_after: String,
}

/// Full morphological analysis of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub original_word: String,
    pub normalized_word: String,
    pub root: String,
    pub root_info: Option<RootInfo>,
    pub prefix_match: Option<PrefixMatch>,
    pub suffix_match: Option<SuffixMatch>,
    pub sandhi_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandhi: Option<SandhiAdjustment>,
    /// Dictionary features overlaid with suffix features.
    pub derived_features: FeatureBundle,
    pub is_exception: bool,
    /// False when the root could not be confirmed against the dictionary.
    pub root_resolved: bool,
    /// Trailing characters dropped before the dictionary accepted the stem.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub trimmed_chars: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl AnalysisResult {
    /// Lexical category: the dictionary's if the root resolved, else the
    /// derived one.
    pub fn category(&self) -> Option<&str> {
        self.root_info
            .as_ref()
            .and_then(|info| info.category())
            .or(self.derived_features.category.as_deref())
    }
}
