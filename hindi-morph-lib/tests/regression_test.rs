// Regression tests for known edge cases.

use hindi_morph_lib::output::to_bracketed;
use hindi_morph_lib::{analyze_word, normalize, Analyzer, Dictionary, MorphError, RuleStore};
use serde_json::json;

fn analyze(word: &str) -> hindi_morph_lib::AnalysisResult {
    analyze_word(word, &RuleStore::new(), &Dictionary::new())
}

#[test]
fn hai_is_exception() {
    let result = analyze("है");
    assert!(result.is_exception);
    assert_eq!(result.root, "है");
    assert_eq!(result.category(), Some("verb"));
    assert_eq!(result.root_info.unwrap().meaning.as_deref(), Some("to be"));
}

#[test]
fn ladkon_plural_oblique() {
    let result = analyze("लड़कों");
    assert_eq!(result.root, normalize("लड़क"));
    let f = &result.suffix_match.expect("should match ों").features;
    assert_eq!(f.number.as_deref(), Some("plural"));
    assert_eq!(f.case.as_deref(), Some("oblique"));
}

#[test]
fn precomposed_nukta_matches_decomposed() {
    // U+095C is the precomposed form of ड़.
    let precomposed = analyze("ल\u{095C}कों");
    let decomposed = analyze("ल\u{0921}\u{093C}कों");
    assert_eq!(precomposed.root, decomposed.root);
    assert!(precomposed.root_resolved);
}

#[test]
fn normalisation_is_idempotent() {
    for w in ["लड़कों", "ल\u{095C}का", "\u{200B} पढ़ती ", "किताबें", "कि\u{093F}ताब"] {
        let once = normalize(w);
        assert_eq!(normalize(&once), once, "{w:?}");
    }
}

#[test]
fn khaya_prefers_longer_suffix() {
    let result = analyze("खाया");
    assert_eq!(result.suffix_match.unwrap().suffix, "या");
    assert_eq!(result.root, "खा");
    assert!(result.root_resolved);
}

#[test]
fn asafal_negative_prefix() {
    assert_eq!(to_bracketed(&analyze("असफल")), "{अ-:negative}, {सफल:adjective}");
}

#[test]
fn achchha_keeps_initial_a() {
    // "अ" looks like the negative prefix, but "अच्छ" is the root.
    let result = analyze("अच्छा");
    assert!(result.prefix_match.is_none());
    assert_eq!(result.root, "अच्छ");
    assert_eq!(result.category(), Some("adjective"));
}

#[test]
fn pita_is_whole_word() {
    // "पित" + "ा" would be a plausible split, but only "पिता" is a root.
    let result = analyze("पिता");
    assert!(result.suffix_match.is_none());
    assert_eq!(result.root, "पिता");
    assert!(result.root_resolved);
}

#[test]
fn sandhi_contraction_reversed() {
    let rules = RuleStore::from_document(&json!({
        "suffix_rules": { "इश": { "category": "noun" } },
        "sandhi_rules": { "ा+इ": "े" }
    }))
    .unwrap();
    let dict = Dictionary::from_document(&json!({ "गणा": { "category": "noun" } })).unwrap();
    let result = analyze_word("गणेइश", &rules, &dict);
    assert!(result.sandhi_applied);
    assert_eq!(result.root, "गणा");
}

#[test]
fn unknown_words_do_not_fail() {
    let analyzer = Analyzer::with_defaults();
    let results = analyzer.analyze_text("ज़ुक़ाम क्षितिज");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.root_resolved));
}

#[test]
fn malformed_rules_keep_previous() {
    let analyzer = Analyzer::with_defaults();
    let err = analyzer
        .load_rules(&json!({ "suffix_rules": ["ा", "ों"] }))
        .unwrap_err();
    assert!(matches!(err, MorphError::ConfigMalformed(_)));
    assert_eq!(analyzer.analyze_word("लड़कों").suffix_match.unwrap().suffix, "ों");
}

#[test]
fn bad_entries_are_skipped_not_fatal() {
    let analyzer = Analyzer::with_defaults();
    analyzer
        .load_rules(&json!({
            "suffix_rules": { "ों": { "number": "plural" }, "ा": 7 },
            "prefix_rules": { "अ": { "type": "negative" } }
        }))
        .unwrap();
    let snap = analyzer.snapshot();
    assert_eq!(snap.rules.suffix_rules().len(), 1);
    assert!(snap.rules.prefix_rules().is_empty());
}

#[test]
fn exported_rules_reload_identically() {
    let rules = RuleStore::new();
    let reloaded = RuleStore::from_document(&rules.to_document()).unwrap();
    assert_eq!(reloaded.to_document(), rules.to_document());
    assert_eq!(reloaded.exception_count(), rules.exception_count());
}
