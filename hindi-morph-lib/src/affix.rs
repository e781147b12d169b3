// Prefix/suffix stripping.
//
// Prefix and suffix are both matched against the original word boundary, not
// against each other's residue, and then removed together. The dictionary is
// consulted only to decide whether an affix match should be given back.

use log::trace;

use crate::dictionary::Dictionary;
use crate::rules::{PrefixRule, RuleStore, SuffixRule};

/// What affix stripping left of a word.
#[derive(Debug, Clone, PartialEq)]
pub struct StripResult<'r> {
    pub stem: String,
    pub prefix: Option<&'r PrefixRule>,
    pub suffix: Option<&'r SuffixRule>,
}

/// Strip the longest matching prefix and suffix from `word`.
///
/// A matched affix is given back (kept as part of the stem) when stripping it
/// would produce a stem the dictionary does not know while keeping it would
/// not:
/// - with both affixes, a stem shorter than `min_stem_chars` that is not a
///   dictionary root falls back to suffix-only stripping;
/// - a prefix is retained when the stem without it is unknown but the stem
///   with it is a root;
/// - all stripping is undone when the word itself is a root and the stripped
///   stem is not.
pub fn strip<'r>(
    word: &str,
    rules: &'r RuleStore,
    dict: &Dictionary,
    min_stem_chars: usize,
) -> StripResult<'r> {
    let prefix = rules.longest_prefix_match(word);
    let suffix = rules.longest_suffix_match(word);

    let start = prefix.map_or(0, |p| p.prefix.len());
    let end = word.len() - suffix.map_or(0, |s| s.suffix.len());

    let mut result = if start >= end {
        // Prefix and suffix overlap; the suffix alone still leaves a stem.
        trace!("{word}: prefix and suffix overlap, dropping prefix");
        StripResult {
            stem: word[..end].to_string(),
            prefix: None,
            suffix,
        }
    } else {
        StripResult {
            stem: word[start..end].to_string(),
            prefix,
            suffix,
        }
    };

    if let (Some(p), Some(_)) = (result.prefix, result.suffix) {
        let unknown_short =
            result.stem.chars().count() < min_stem_chars && !dict.contains(&result.stem);
        if unknown_short {
            trace!(
                "{word}: stem {:?} too short after double strip, keeping prefix {:?}",
                result.stem,
                p.prefix
            );
            result.stem = word[..end].to_string();
            result.prefix = None;
        }
    }

    if let Some(p) = result.prefix {
        let with_prefix = format!("{}{}", p.prefix, result.stem);
        if !dict.contains(&result.stem) && dict.contains(&with_prefix) {
            trace!("{word}: {with_prefix:?} is a root, keeping prefix {:?}", p.prefix);
            result.stem = with_prefix;
            result.prefix = None;
        }
    }

    if (result.prefix.is_some() || result.suffix.is_some())
        && !dict.contains(&result.stem)
        && dict.contains(word)
    {
        trace!("{word}: whole word is a root, undoing affix match");
        result = StripResult {
            stem: word.to_string(),
            prefix: None,
            suffix: None,
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> RuleStore {
        RuleStore::from_document(&json!({
            "suffix_rules": {
                "ा": { "category": "noun", "gender": "masculine" },
                "ी": { "category": "noun", "gender": "feminine" },
                "ों": { "category": "noun", "number": "plural" },
                "ता": { "category": "verb", "tense": "present" }
            },
            "prefix_rules": {
                "अ": { "meaning": "negation", "type": "negative" },
                "सु": { "meaning": "good", "type": "quality" }
            }
        }))
        .unwrap()
    }

    fn dict() -> Dictionary {
        Dictionary::from_document(&json!({
            "लड़क": { "category": "noun" },
            "सफल": { "category": "adjective" },
            "अच्छ": { "category": "adjective" },
            "पिता": { "category": "noun" }
        }))
        .unwrap()
    }

    #[test]
    fn test_no_affix() {
        let (r, d) = (rules(), dict());
        let s = strip("घर", &r, &d, 2);
        assert_eq!(s.stem, "घर");
        assert!(s.prefix.is_none());
        assert!(s.suffix.is_none());
    }

    #[test]
    fn test_suffix_only() {
        let (r, d) = (rules(), dict());
        let s = strip("लड़कों", &r, &d, 2);
        assert_eq!(s.stem, "लड़क");
        assert_eq!(s.suffix.unwrap().suffix, "ों");
        assert!(s.prefix.is_none());
    }

    #[test]
    fn test_prefix_only() {
        let (r, d) = (rules(), dict());
        let s = strip("असफल", &r, &d, 2);
        assert_eq!(s.stem, "सफल");
        assert_eq!(s.prefix.unwrap().prefix, "अ");
    }

    #[test]
    fn test_prefix_and_suffix_from_same_word() {
        let (r, d) = (rules(), dict());
        // Both matched against the original boundaries.
        let s = strip("असफलता", &r, &d, 2);
        assert_eq!(s.prefix.unwrap().prefix, "अ");
        assert_eq!(s.suffix.unwrap().suffix, "ता");
        assert_eq!(s.stem, "सफल");
    }

    #[test]
    fn test_short_stem_keeps_prefix() {
        let (r, d) = (rules(), dict());
        // "सु" + "ख" + "ी": double stripping would leave the unknown "ख".
        let s = strip("सुखी", &r, &d, 2);
        assert!(s.prefix.is_none());
        assert_eq!(s.suffix.unwrap().suffix, "ी");
        assert_eq!(s.stem, "सुख");
    }

    #[test]
    fn test_known_short_stem_strips_both() {
        let r = rules();
        let d = Dictionary::from_document(&json!({ "ख": { "category": "noun" } })).unwrap();
        // "ख" is short but the dictionary knows it, so both affixes go.
        let s = strip("सुखी", &r, &d, 2);
        assert_eq!(s.prefix.unwrap().prefix, "सु");
        assert_eq!(s.suffix.unwrap().suffix, "ी");
        assert_eq!(s.stem, "ख");
    }

    #[test]
    fn test_known_prefixed_root_keeps_prefix() {
        let (r, d) = (rules(), dict());
        // "अच्छ" is a root; "च्छ" is not.
        let s = strip("अच्छा", &r, &d, 2);
        assert!(s.prefix.is_none());
        assert_eq!(s.stem, "अच्छ");
    }

    #[test]
    fn test_overlapping_affixes() {
        let r = RuleStore::from_document(&json!({
            "suffix_rules": { "बा": { "category": "noun" } },
            "prefix_rules": { "अब": { "meaning": "x", "type": "y" } }
        }))
        .unwrap();
        let s = strip("अबा", &r, &Dictionary::empty(), 2);
        assert!(s.prefix.is_none());
        assert_eq!(s.stem, "अ");
    }

    #[test]
    fn test_whole_word_root_is_not_stripped() {
        let (r, d) = (rules(), dict());
        let s = strip("पिता", &r, &d, 2);
        assert_eq!(s.stem, "पिता");
        assert!(s.suffix.is_none());
    }
}
