//! Accuracy evaluation against labelled words, plus a throughput run over
//! sample sentences.

use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::Analyzer;
use crate::normalize::normalize;
use crate::types::FeatureBundle;

/// One labelled word. Every feature besides `category` is checked against
/// the derived feature bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    pub word: String,
    pub root: String,
    #[serde(flatten)]
    pub expected: FeatureBundle,
}

impl TestItem {
    fn new(word: &str, root: &str, features: &[(&str, &str)]) -> Self {
        let mut expected = FeatureBundle::default();
        for (k, v) in features {
            expected.set(k, *v);
        }
        TestItem {
            word: word.to_string(),
            root: root.to_string(),
            expected,
        }
    }
}

/// Accuracy figures, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub total: usize,
    pub root_accuracy: f64,
    pub category_accuracy: f64,
    pub feature_accuracy: f64,
    pub overall_accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RootMismatch,
    CategoryMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observed {
    pub root: String,
    pub category: String,
}

/// A word whose root or category came out wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub word: String,
    pub expected: Observed,
    pub actual: Observed,
    pub error_type: Vec<ErrorKind>,
}

/// Throughput over a batch of sentences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentenceMetrics {
    pub total_sentences: usize,
    pub total_words: usize,
    pub resolved_words: usize,
    pub total_seconds: f64,
    pub words_per_second: f64,
}

/// Everyday sentences covering nouns, verbs, pronouns and postpositions.
pub const SAMPLE_SENTENCES: &[&str] = &[
    "राम घर जाता है।",
    "सीता किताब पढ़ती है।",
    "लड़के स्कूल में खेल रहे हैं।",
    "मैं कल दिल्ली जाऊँगा।",
    "वह बहुत अच्छा गाना गाती है।",
    "मेरे पिता अध्यापक हैं।",
    "बारिश होने के कारण मैं घर पर रहा।",
    "क्या तुम मेरे साथ बाज़ार चलोगे?",
    "छोटे बच्चे तेज़ी से सीखते हैं।",
    "यह फल बहुत मीठा है।",
];

/// The built-in labelled dataset, truncated to `size` items.
pub fn builtin_dataset(size: usize) -> Vec<TestItem> {
    let noun = |g, n, c| vec![("category", "noun"), ("gender", g), ("number", n), ("case", c)];
    let verb = |extra: &[(&'static str, &'static str)]| {
        let mut f = vec![("category", "verb")];
        f.extend_from_slice(extra);
        f
    };
    let adj = |g, n| vec![("category", "adjective"), ("gender", g), ("number", n)];

    let rows: Vec<(&str, &str, Vec<(&str, &str)>)> = vec![
        ("लड़का", "लड़क", noun("masculine", "singular", "direct")),
        ("लड़के", "लड़क", noun("masculine", "plural", "direct")),
        ("लड़की", "लड़क", noun("feminine", "singular", "direct")),
        ("लड़कियां", "लड़क", noun("feminine", "plural", "direct")),
        ("किताब", "किताब", noun("feminine", "singular", "direct")),
        ("किताबें", "किताब", noun("feminine", "plural", "direct")),
        ("पढ़ना", "पढ़", verb(&[("form", "infinitive")])),
        (
            "पढ़ता",
            "पढ़",
            verb(&[
                ("tense", "present"),
                ("aspect", "habitual"),
                ("gender", "masculine"),
                ("number", "singular"),
            ]),
        ),
        (
            "पढ़ती",
            "पढ़",
            verb(&[
                ("tense", "present"),
                ("aspect", "habitual"),
                ("gender", "feminine"),
                ("number", "singular"),
            ]),
        ),
        (
            "पढ़ा",
            "पढ़",
            verb(&[
                ("tense", "past"),
                ("aspect", "perfective"),
                ("gender", "masculine"),
                ("number", "singular"),
            ]),
        ),
        (
            "पढ़ेगा",
            "पढ़",
            verb(&[
                ("tense", "future"),
                ("gender", "masculine"),
                ("number", "singular"),
            ]),
        ),
        ("अच्छा", "अच्छ", adj("masculine", "singular")),
        ("अच्छी", "अच्छ", adj("feminine", "singular")),
        ("अच्छे", "अच्छ", adj("masculine", "plural")),
    ];

    rows.into_iter()
        .take(size)
        .map(|(w, r, f)| TestItem::new(w, r, &f))
        .collect()
}

struct Outcome {
    root_ok: bool,
    category_ok: bool,
    features_ok: bool,
    actual: Observed,
}

fn check(analyzer: &Analyzer, item: &TestItem) -> Outcome {
    let result = analyzer.analyze_word(&item.word);
    let root_ok = result.root == normalize(&item.root);
    let category_ok = result.category() == item.expected.category.as_deref();
    let features_ok = item
        .expected
        .iter()
        .filter(|(k, _)| *k != "category")
        .all(|(k, v)| result.derived_features.get(k) == Some(v));
    Outcome {
        root_ok,
        category_ok,
        features_ok,
        actual: Observed {
            category: result.category().unwrap_or("unknown").to_string(),
            root: result.root,
        },
    }
}

fn percent(n: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 * 100.0 / total as f64
    }
}

/// Score the analyser on labelled items.
pub fn evaluate(analyzer: &Analyzer, items: &[TestItem]) -> EvaluationMetrics {
    let (mut roots, mut categories, mut features) = (0, 0, 0);
    for item in items {
        let o = check(analyzer, item);
        roots += usize::from(o.root_ok);
        categories += usize::from(o.category_ok);
        features += usize::from(o.features_ok);
    }
    let total = items.len();
    let metrics = EvaluationMetrics {
        total,
        root_accuracy: percent(roots, total),
        category_accuracy: percent(categories, total),
        feature_accuracy: percent(features, total),
        overall_accuracy: percent(roots + categories + features, total * 3),
    };
    info!(
        "evaluated {total} items: root {:.1}%, category {:.1}%, features {:.1}%",
        metrics.root_accuracy, metrics.category_accuracy, metrics.feature_accuracy
    );
    metrics
}

/// List every item whose root or category is wrong.
pub fn error_analysis(analyzer: &Analyzer, items: &[TestItem]) -> Vec<ErrorReport> {
    items
        .iter()
        .filter_map(|item| {
            let o = check(analyzer, item);
            let mut error_type = Vec::new();
            if !o.root_ok {
                error_type.push(ErrorKind::RootMismatch);
            }
            if !o.category_ok {
                error_type.push(ErrorKind::CategoryMismatch);
            }
            if error_type.is_empty() {
                return None;
            }
            Some(ErrorReport {
                word: item.word.clone(),
                expected: Observed {
                    root: item.root.clone(),
                    category: item
                        .expected
                        .category
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                },
                actual: o.actual,
                error_type,
            })
        })
        .collect()
}

/// Analyse each sentence and report word counts and throughput.
pub fn evaluate_sentences(analyzer: &Analyzer, sentences: &[&str]) -> SentenceMetrics {
    let start = Instant::now();
    let mut total_words = 0;
    let mut resolved_words = 0;
    for sentence in sentences {
        let results = analyzer.analyze_text(sentence);
        total_words += results.len();
        resolved_words += results.iter().filter(|r| r.root_resolved).count();
    }
    let total_seconds = start.elapsed().as_secs_f64();
    SentenceMetrics {
        total_sentences: sentences.len(),
        total_words,
        resolved_words,
        total_seconds,
        words_per_second: if total_seconds > 0.0 {
            total_words as f64 / total_seconds
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_truncates() {
        assert_eq!(builtin_dataset(100).len(), 14);
        assert_eq!(builtin_dataset(3).len(), 3);
        assert!(builtin_dataset(0).is_empty());
        let first = &builtin_dataset(1)[0];
        assert_eq!(first.word, "लड़का");
        assert_eq!(first.expected.case.as_deref(), Some("direct"));
    }

    #[test]
    fn test_perfect_item() {
        let analyzer = Analyzer::with_defaults();
        let m = evaluate(&analyzer, &builtin_dataset(1));
        assert_eq!(m.total, 1);
        assert_eq!(m.root_accuracy, 100.0);
        assert_eq!(m.category_accuracy, 100.0);
        assert_eq!(m.feature_accuracy, 100.0);
        assert_eq!(m.overall_accuracy, 100.0);
    }

    #[test]
    fn test_empty_dataset() {
        let m = evaluate(&Analyzer::with_defaults(), &[]);
        assert_eq!(m.total, 0);
        assert_eq!(m.overall_accuracy, 0.0);
    }

    #[test]
    fn test_partial_credit() {
        let analyzer = Analyzer::with_defaults();
        let items = vec![
            TestItem::new("घर", "घरा", &[("category", "noun")]),
            TestItem::new("घर", "घर", &[("category", "verb")]),
        ];
        let m = evaluate(&analyzer, &items);
        assert_eq!(m.root_accuracy, 50.0);
        assert_eq!(m.category_accuracy, 50.0);
        assert_eq!(m.feature_accuracy, 100.0);
    }

    #[test]
    fn test_error_analysis_kinds() {
        let analyzer = Analyzer::with_defaults();
        let items = vec![
            TestItem::new("घर", "घर", &[("category", "noun")]),
            TestItem::new("घर", "घरा", &[("category", "verb")]),
        ];
        let errors = error_analysis(&analyzer, &items);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].error_type,
            vec![ErrorKind::RootMismatch, ErrorKind::CategoryMismatch]
        );
        assert_eq!(errors[0].actual.category, "noun");
        let v = serde_json::to_value(&errors[0]).unwrap();
        assert_eq!(v["error_type"][0], "root_mismatch");
    }

    #[test]
    fn test_item_deserialises_flat() {
        let item: TestItem = serde_json::from_str(
            r#"{"word": "पढ़ना", "root": "पढ़", "category": "verb", "form": "infinitive"}"#,
        )
        .unwrap();
        assert_eq!(item.expected.form.as_deref(), Some("infinitive"));
        assert_eq!(item.expected.category.as_deref(), Some("verb"));
    }

    #[test]
    fn test_sentences_counted() {
        let m = evaluate_sentences(&Analyzer::with_defaults(), SAMPLE_SENTENCES);
        assert_eq!(m.total_sentences, 10);
        assert_eq!(m.total_words, 53);
        assert!(m.resolved_words > 0);
        assert!(m.resolved_words <= m.total_words);
    }
}
