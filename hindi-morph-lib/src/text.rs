// Text-level analysis: split into words and analyse each independently.

use unicode_segmentation::UnicodeSegmentation;

use crate::dictionary::Dictionary;
use crate::morphology::{self, AnalyzerOptions};
use crate::rules::RuleStore;
use crate::types::AnalysisResult;

/// Analyse every word of `text` in order. Repeated words are analysed (and
/// reported) each time they occur.
pub fn analyze_text(text: &str, rules: &RuleStore, dict: &Dictionary) -> Vec<AnalysisResult> {
    analyze_text_with(text, rules, dict, &AnalyzerOptions::default())
}

pub fn analyze_text_with(
    text: &str,
    rules: &RuleStore,
    dict: &Dictionary,
    options: &AnalyzerOptions,
) -> Vec<AnalysisResult> {
    tokenize(text)
        .into_iter()
        .map(|w| morphology::analyze_word_with(w, rules, dict, options))
        .collect()
}

/// Split text into words on whitespace and punctuation (including the danda
/// "।" and double danda "॥"). Combining marks, nukta and virama stay inside
/// their word.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .collect()
}

/// The only word in `input`, if it holds exactly one. Surrounding
/// punctuation is dropped, so "है," and "(घर)" count as single words.
pub fn single_word(input: &str) -> Option<&str> {
    match tokenize(input).as_slice() {
        [word] => Some(*word),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(tokenize("राम घर जाता है।"), vec!["राम", "घर", "जाता", "है"]);
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            tokenize("क्या तुम मेरे साथ बाज़ार चलोगे?"),
            vec!["क्या", "तुम", "मेरे", "साथ", "बाज़ार", "चलोगे"]
        );
        assert_eq!(
            tokenize("(घर), \"किताब\"; लड़के-लड़कियाँ॥"),
            vec!["घर", "किताब", "लड़के", "लड़कियाँ"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ।, ").is_empty());
    }

    #[test]
    fn test_single_word_strips_punctuation() {
        assert_eq!(single_word("है,"), Some("है"));
        assert_eq!(single_word(" (घर) "), Some("घर"));
        assert_eq!(single_word("है।"), Some("है"));
        assert_eq!(single_word("घर जाता"), None);
        assert_eq!(single_word("लड़के-लड़कियाँ"), None);
        assert_eq!(single_word("।"), None);
    }

    #[test]
    fn test_single_word_hits_exception() {
        let rules = RuleStore::new();
        let dict = Dictionary::new();
        let word = single_word("है,").unwrap();
        assert!(morphology::analyze_word(word, &rules, &dict).is_exception);
    }

    #[test]
    fn test_analyze_text_keeps_order_and_duplicates() {
        let rules = RuleStore::new();
        let dict = Dictionary::new();
        let results = analyze_text("घर घर लड़कों है", &rules, &dict);
        let words: Vec<&str> = results.iter().map(|r| r.original_word.as_str()).collect();
        assert_eq!(words, vec!["घर", "घर", "लड़कों", "है"]);
        assert!(results[3].is_exception);
    }
}
