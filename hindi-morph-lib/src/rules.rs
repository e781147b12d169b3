// Suffix, prefix, sandhi and exception tables.
//
// Documents are validated entry by entry: a malformed entry is skipped with a
// warning, while a document whose top level (or a whole section) is not a
// mapping is rejected outright. Every rule records the position it was read
// at, which is the tie-break for equally long matches.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde_json::{Map, Value};
use unicode_normalization::char::is_combining_mark;

use crate::dictionary::parse_root_info;
use crate::error::{MorphError, Result};
use crate::normalize::{is_vocalic, normalize};
use crate::types::{ExceptionRecord, FeatureBundle, PrefixInfo, FEATURE_KEYS};

const EMBEDDED_RULES: &str = include_str!("../data/default_rules.json");

/// Joins the two halves of a sandhi boundary key ("ा+इ").
pub const SANDHI_DELIMITER: &str = "+";

const SECTIONS: &[&str] = &["suffix_rules", "prefix_rules", "sandhi_rules", "exceptions"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixRule {
    pub suffix: String,
    pub features: FeatureBundle,
    /// Position in the source document.
    pub priority: usize,
    char_len: usize,
}

impl SuffixRule {
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    pub prefix: String,
    pub info: PrefixInfo,
    pub priority: usize,
    char_len: usize,
}

impl PrefixRule {
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

/// One boundary contraction: `left + right` surfaces as `contracted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandhiRule {
    /// Boundary key as written in the document (`left` + delimiter + `right`).
    pub key: String,
    pub left: String,
    pub right: String,
    pub contracted: String,
    /// False when the contracted form is not a pure vowel contraction (e.g.
    /// "ु+अ" → "्व"). Such rules are kept for export but never reversed.
    pub reversible: bool,
    pub priority: usize,
}

/// Immutable rule tables. Build a new store to change rules; never mutate one
/// that analyses may be reading.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    /// Longest first, verbs before other categories, then document order.
    suffixes: Vec<SuffixRule>,
    /// Longest first, then document order.
    prefixes: Vec<PrefixRule>,
    sandhi: HashMap<String, SandhiRule>,
    /// Sandhi keys in document order.
    sandhi_order: Vec<String>,
    exceptions: HashMap<String, ExceptionRecord>,
    /// Exception keys in document order.
    exception_order: Vec<String>,
}

impl RuleStore {
    /// The built-in rule set compiled into the library.
    pub fn new() -> Self {
        Self::from_json_str(EMBEDDED_RULES).expect("embedded rule JSON is invalid")
    }

    /// A store with no rules: every word is its own stem.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a rule document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        Self::from_document(&doc)
    }

    /// Validate a parsed rule document with the four sections `suffix_rules`,
    /// `prefix_rules`, `sandhi_rules` and `exceptions`. Missing sections are
    /// empty.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let top = doc
            .as_object()
            .ok_or_else(|| MorphError::malformed("rule document is not a mapping"))?;

        for key in top.keys() {
            if !SECTIONS.contains(&key.as_str()) {
                warn!("ignoring unknown rule section {key:?}");
            }
        }

        let mut store = RuleStore::default();

        if let Some(section) = section(top, "suffix_rules")? {
            for (priority, (raw, value)) in section.iter().enumerate() {
                let suffix = normalize(raw);
                if suffix.is_empty() {
                    warn!("skipping suffix rule with empty key");
                    continue;
                }
                if store.suffixes.iter().any(|r| r.suffix == suffix) {
                    warn!("skipping duplicate suffix rule {raw:?}");
                    continue;
                }
                match parse_feature_bundle(value) {
                    Ok(features) => store.suffixes.push(SuffixRule {
                        char_len: suffix.chars().count(),
                        suffix,
                        features,
                        priority,
                    }),
                    Err(reason) => warn!("skipping suffix rule {raw:?}: {reason}"),
                }
            }
        }

        if let Some(section) = section(top, "prefix_rules")? {
            for (priority, (raw, value)) in section.iter().enumerate() {
                let prefix = normalize(raw);
                if prefix.is_empty() {
                    warn!("skipping prefix rule with empty key");
                    continue;
                }
                if store.prefixes.iter().any(|r| r.prefix == prefix) {
                    warn!("skipping duplicate prefix rule {raw:?}");
                    continue;
                }
                match parse_prefix_info(value) {
                    Ok(info) => store.prefixes.push(PrefixRule {
                        char_len: prefix.chars().count(),
                        prefix,
                        info,
                        priority,
                    }),
                    Err(reason) => warn!("skipping prefix rule {raw:?}: {reason}"),
                }
            }
        }

        if let Some(section) = section(top, "sandhi_rules")? {
            for (priority, (raw, value)) in section.iter().enumerate() {
                let Some(contracted) = value.as_str().map(normalize).filter(|s| !s.is_empty())
                else {
                    warn!("skipping sandhi rule {raw:?}: value is not a non-empty string");
                    continue;
                };
                let key = normalize(raw);
                if store.sandhi.contains_key(&key) {
                    warn!("skipping duplicate sandhi rule {raw:?}");
                    continue;
                }
                let (left, right) = match key.split_once(SANDHI_DELIMITER) {
                    Some((l, r)) if !l.is_empty() && !r.is_empty() => (l.to_string(), r.to_string()),
                    _ => {
                        warn!(
                            "skipping sandhi rule {raw:?}: key is not two parts joined by {SANDHI_DELIMITER:?}"
                        );
                        continue;
                    }
                };
                let reversible = is_vocalic(&contracted) && !right.contains(SANDHI_DELIMITER);
                if !reversible {
                    warn!(
                        "sandhi rule {raw:?} -> {contracted:?} is not a vowel contraction; \
                         it will not be reversed"
                    );
                }
                store.sandhi_order.push(key.clone());
                store.sandhi.insert(
                    key.clone(),
                    SandhiRule {
                        key,
                        left,
                        right,
                        contracted,
                        reversible,
                        priority,
                    },
                );
            }
        }

        if let Some(section) = section(top, "exceptions")? {
            for (raw, value) in section {
                let word = normalize(raw);
                if word.is_empty() || store.exceptions.contains_key(&word) {
                    warn!("skipping empty or duplicate exception {raw:?}");
                    continue;
                }
                match parse_exception(&word, value) {
                    Ok(record) => {
                        store.exception_order.push(word.clone());
                        store.exceptions.insert(word, record);
                    }
                    Err(reason) => warn!("skipping exception {raw:?}: {reason}"),
                }
            }
        }

        store.suffixes.sort_by(|a, b| {
            b.char_len
                .cmp(&a.char_len)
                .then_with(|| b.features.is_verb().cmp(&a.features.is_verb()))
                .then_with(|| a.priority.cmp(&b.priority))
        });
        store.prefixes.sort_by(|a, b| {
            b.char_len
                .cmp(&a.char_len)
                .then_with(|| a.priority.cmp(&b.priority))
        });

        info!(
            "loaded rules: {} suffixes, {} prefixes, {} sandhi, {} exceptions",
            store.suffixes.len(),
            store.prefixes.len(),
            store.sandhi.len(),
            store.exceptions.len()
        );
        Ok(store)
    }

    /// The longest suffix rule that is a proper suffix of `word` (removing it
    /// leaves at least one character). Equal lengths prefer verb rules, then
    /// document order.
    pub fn longest_suffix_match(&self, word: &str) -> Option<&SuffixRule> {
        self.suffixes
            .iter()
            .find(|r| word.len() > r.suffix.len() && word.ends_with(&r.suffix))
    }

    /// The longest prefix rule that is a proper prefix of `word`. A prefix
    /// never splits a consonant from the mark that follows it, so the rest of
    /// the word must not start with a combining mark.
    pub fn longest_prefix_match(&self, word: &str) -> Option<&PrefixRule> {
        self.prefixes.iter().find(|r| {
            word.len() > r.prefix.len()
                && word.starts_with(&r.prefix)
                && !word[r.prefix.len()..].starts_with(is_combining_mark)
        })
    }

    pub fn sandhi_rule(&self, key: &str) -> Option<&SandhiRule> {
        self.sandhi.get(key)
    }

    /// Sandhi rules in document order.
    pub fn sandhi_rules(&self) -> impl Iterator<Item = &SandhiRule> {
        self.sandhi_order.iter().filter_map(|k| self.sandhi.get(k))
    }

    /// Exception record for an already normalised word.
    pub fn exception(&self, word: &str) -> Option<&ExceptionRecord> {
        self.exceptions.get(word)
    }

    /// Suffix rules in match order.
    pub fn suffix_rules(&self) -> &[SuffixRule] {
        &self.suffixes
    }

    /// Prefix rules in match order.
    pub fn prefix_rules(&self) -> &[PrefixRule] {
        &self.prefixes
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Render the store back into the four-section document form, each
    /// section in document order.
    pub fn to_document(&self) -> Value {
        let mut suffixes: Vec<&SuffixRule> = self.suffixes.iter().collect();
        suffixes.sort_by_key(|r| r.priority);
        let mut prefixes: Vec<&PrefixRule> = self.prefixes.iter().collect();
        prefixes.sort_by_key(|r| r.priority);

        let mut doc = Map::new();
        doc.insert(
            "suffix_rules".into(),
            Value::Object(
                suffixes
                    .into_iter()
                    .map(|r| (r.suffix.clone(), to_value(&r.features)))
                    .collect(),
            ),
        );
        doc.insert(
            "prefix_rules".into(),
            Value::Object(
                prefixes
                    .into_iter()
                    .map(|r| (r.prefix.clone(), to_value(&r.info)))
                    .collect(),
            ),
        );
        doc.insert(
            "sandhi_rules".into(),
            Value::Object(
                self.sandhi_rules()
                    .map(|r| (r.key.clone(), Value::String(r.contracted.clone())))
                    .collect(),
            ),
        );
        doc.insert(
            "exceptions".into(),
            Value::Object(
                self.exception_order
                    .iter()
                    .filter_map(|k| self.exceptions.get(k).map(|r| (k.clone(), to_value(r))))
                    .collect(),
            ),
        );
        Value::Object(doc)
    }
}

fn to_value<T: serde::Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

/// Fetch a section; absent is fine, present-but-not-a-mapping is fatal.
fn section<'a>(top: &'a Map<String, Value>, name: &str) -> Result<Option<&'a Map<String, Value>>> {
    match top.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(MorphError::malformed(format!("section {name:?} is not a mapping"))),
    }
}

/// A suffix rule value: a mapping of feature names to strings. Unknown
/// feature names are dropped; a non-string value rejects the entry.
fn parse_feature_bundle(value: &Value) -> std::result::Result<FeatureBundle, String> {
    let map = value.as_object().ok_or("value is not a mapping")?;
    let mut features = FeatureBundle::default();
    for (key, v) in map {
        let s = v
            .as_str()
            .ok_or_else(|| format!("feature {key:?} is not a string"))?;
        if !features.set(key, s) {
            debug!("ignoring unknown feature {key:?} (known: {})", FEATURE_KEYS.join(", "));
        }
    }
    Ok(features)
}

fn parse_prefix_info(value: &Value) -> std::result::Result<PrefixInfo, String> {
    let map = value.as_object().ok_or("value is not a mapping")?;
    let mut info = PrefixInfo::default();
    let mut has_meaning = false;
    for (key, v) in map {
        let s = v
            .as_str()
            .ok_or_else(|| format!("field {key:?} is not a string"))?;
        match key.as_str() {
            "meaning" => {
                info.meaning = s.to_string();
                has_meaning = true;
            }
            "type" => info.kind = s.to_string(),
            _ => debug!("ignoring unknown prefix field {key:?}"),
        }
    }
    if !has_meaning {
        return Err("missing \"meaning\"".into());
    }
    Ok(info)
}

fn parse_exception(word: &str, value: &Value) -> std::result::Result<ExceptionRecord, String> {
    let map = value.as_object().ok_or("value is not a mapping")?;
    let text = |key: &str| -> std::result::Result<Option<String>, String> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(format!("{key:?} is not a string")),
        }
    };
    let root_info = match map.get("root_info") {
        None | Some(Value::Null) => None,
        Some(v) => Some(parse_root_info(v).ok_or("\"root_info\" is not a mapping")?),
    };
    Ok(ExceptionRecord {
        original: text("original")?.unwrap_or_else(|| word.to_string()),
        normalized: text("normalized")?
            .map(|s| normalize(&s))
            .unwrap_or_else(|| word.to_string()),
        root: text("root")?
            .map(|s| normalize(&s))
            .unwrap_or_else(|| word.to_string()),
        root_info,
    })
}
