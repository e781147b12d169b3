use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::error::{MorphError, Result};
use crate::normalize::normalize;
use crate::types::RootInfo;

const EMBEDDED_JSON: &str = include_str!("../data/default_dictionary.json");

/// Read-only root lexicon: root string → lexical metadata.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, RootInfo>,
}

impl Dictionary {
    /// Load the minimal dictionary compiled into the library.
    pub fn new() -> Self {
        Self::from_json_str(EMBEDDED_JSON).expect("embedded dictionary JSON is invalid")
    }

    /// A dictionary with no entries; every root comes back unresolved.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        Self::from_document(&doc)
    }

    /// Build a dictionary from a mapping of root → metadata mapping. Entries
    /// whose metadata is not a mapping are skipped with a warning.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let top = doc
            .as_object()
            .ok_or_else(|| MorphError::malformed("dictionary document is not a mapping"))?;

        let mut entries = HashMap::with_capacity(top.len());
        for (raw, value) in top {
            let root = normalize(raw);
            if root.is_empty() {
                warn!("skipping dictionary entry with empty root");
                continue;
            }
            match parse_root_info(value) {
                Some(info) => {
                    if entries.insert(root, info).is_some() {
                        warn!("dictionary root {raw:?} appears twice after normalisation; keeping the later entry");
                    }
                }
                None => warn!("skipping dictionary entry {raw:?}: metadata is not a mapping"),
            }
        }

        info!("loaded dictionary: {} roots", entries.len());
        Ok(Self { entries })
    }

    /// Look up the metadata for an (already normalised) root.
    pub fn lookup(&self, root: &str) -> Option<&RootInfo> {
        self.entries.get(root)
    }

    pub fn contains(&self, root: &str) -> bool {
        self.entries.contains_key(root)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the dictionary as a document, roots in sorted order.
    pub fn to_document(&self) -> Value {
        let sorted: BTreeMap<&String, &RootInfo> = self.entries.iter().collect();
        Value::Object(
            sorted
                .into_iter()
                .map(|(root, info)| {
                    (
                        root.clone(),
                        serde_json::to_value(info).unwrap_or(Value::Null),
                    )
                })
                .collect::<Map<String, Value>>(),
        )
    }
}

/// Parse lexical metadata tolerantly. Known feature keys and `meaning` /
/// `example` must be strings (a `null` example is allowed); `base_forms` and
/// `synonyms` keep their string items; any other string-valued key is kept as
/// an attribute. Values of the wrong shape are dropped field by field.
///
/// Returns None only when `value` is not a mapping.
pub(crate) fn parse_root_info(value: &Value) -> Option<RootInfo> {
    let map = value.as_object()?;
    let mut info = RootInfo::default();
    for (key, v) in map {
        match (key.as_str(), v) {
            ("meaning", Value::String(s)) => info.meaning = Some(s.clone()),
            ("example", Value::String(s)) => info.example = Some(s.clone()),
            ("example", Value::Null) => {}
            ("base_forms", Value::Array(items)) => info.base_forms = strings(items),
            ("synonyms", Value::Array(items)) => info.synonyms = strings(items),
            (k, Value::String(s)) => {
                if !info.features.set(k, s.as_str()) {
                    info.attributes.insert(k.to_string(), s.clone());
                }
            }
            (k, _) => debug!("dropping non-string lexical attribute {k:?}"),
        }
    }
    Some(info)
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}
