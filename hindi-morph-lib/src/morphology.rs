// Rule-based Hindi morphological analyser.
//
// Each word runs through a fixed pipeline:
//   normalise → exception lookup → affix stripping → sandhi reversal →
//   dictionary resolution → feature merge
//
// The exception table is the only branch point. Nothing here fails: a word
// no table knows comes back as its own unresolved root.

use log::debug;

use crate::affix;
use crate::dictionary::Dictionary;
use crate::normalize::normalize;
use crate::resolve;
use crate::rules::RuleStore;
use crate::sandhi;
use crate::types::*;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Trailing characters the dictionary resolver may drop on a miss.
    pub max_dictionary_trims: usize,
    /// Stems shorter than this (in characters) after removing both a prefix
    /// and a suffix give the prefix back unless the dictionary knows them.
    pub min_stem_chars: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_dictionary_trims: 2,
            min_stem_chars: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse a single word with default options.
pub fn analyze_word(word: &str, rules: &RuleStore, dict: &Dictionary) -> AnalysisResult {
    analyze_word_with(word, rules, dict, &AnalyzerOptions::default())
}

/// Analyse a single word.
pub fn analyze_word_with(
    word: &str,
    rules: &RuleStore,
    dict: &Dictionary,
    options: &AnalyzerOptions,
) -> AnalysisResult {
    let normalized = normalize(word);

    if let Some(record) = rules.exception(&normalized) {
        debug!("{normalized}: exception table hit");
        return exception_result(record);
    }

    let stripped = affix::strip(&normalized, rules, dict, options.min_stem_chars);
    let suffix_text = stripped.suffix.map_or("", |s| s.suffix.as_str());
    let sandhi = sandhi::resolve_sandhi(&stripped.stem, suffix_text, rules);
    let resolution = resolve::resolve(&sandhi.adjusted_stem, dict, options.max_dictionary_trims);

    debug!(
        "{normalized}: prefix={:?} suffix={:?} stem={:?} root={:?} resolved={}",
        stripped.prefix.map(|p| p.prefix.as_str()),
        stripped.suffix.map(|s| s.suffix.as_str()),
        sandhi.adjusted_stem,
        resolution.root,
        resolution.is_resolved()
    );

    // Dictionary features are the base; suffix features are more specific.
    let mut derived = resolution
        .root_info
        .as_ref()
        .map(|info| info.features.clone())
        .unwrap_or_default();
    if let Some(s) = stripped.suffix {
        derived.merge_from(&s.features);
    }

    AnalysisResult {
        original_word: word.to_string(),
        normalized_word: normalized,
        root_resolved: resolution.is_resolved(),
        trimmed_chars: resolution.trimmed,
        root: resolution.root,
        root_info: resolution.root_info,
        prefix_match: stripped.prefix.map(|p| PrefixMatch {
            prefix: p.prefix.clone(),
            meaning: p.info.meaning.clone(),
            kind: p.info.kind.clone(),
        }),
        suffix_match: stripped.suffix.map(|s| SuffixMatch {
            suffix: s.suffix.clone(),
            features: s.features.clone(),
        }),
        sandhi_applied: sandhi.applied(),
        sandhi: sandhi.adjustment,
        derived_features: derived,
        is_exception: false,
    }
}

/// The pre-resolved record, unchanged, with no affix or sandhi information.
fn exception_result(record: &ExceptionRecord) -> AnalysisResult {
    AnalysisResult {
        original_word: record.original.clone(),
        normalized_word: record.normalized.clone(),
        root: record.root.clone(),
        root_info: record.root_info.clone(),
        prefix_match: None,
        suffix_match: None,
        sandhi_applied: false,
        sandhi: None,
        derived_features: record
            .root_info
            .as_ref()
            .map(|info| info.features.clone())
            .unwrap_or_default(),
        is_exception: true,
        root_resolved: true,
        trimmed_chars: 0,
    }
}
