//! Shared analyser with atomically swappable rules and dictionary.
//!
//! An [`Analyzer`] holds one [`Snapshot`] behind a lock. Every analysis call
//! clones the current snapshot's `Arc` and releases the lock before doing any
//! work, so analyses never block each other and a reload never changes the
//! tables under a running analysis: each call sees either the old or the new
//! snapshot in full. Reloads build a fresh immutable store and replace the
//! snapshot reference; existing stores are never mutated.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use parking_lot::RwLock;
use serde_json::Value;

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::morphology::{self, AnalyzerOptions};
use crate::rules::RuleStore;
use crate::text;
use crate::types::AnalysisResult;

/// An immutable pairing of rules and dictionary.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub rules: Arc<RuleStore>,
    pub dictionary: Arc<Dictionary>,
}

impl Snapshot {
    pub fn analyze_word(&self, word: &str, options: &AnalyzerOptions) -> AnalysisResult {
        morphology::analyze_word_with(word, &self.rules, &self.dictionary, options)
    }

    pub fn analyze_text(&self, input: &str, options: &AnalyzerOptions) -> Vec<AnalysisResult> {
        text::analyze_text_with(input, &self.rules, &self.dictionary, options)
    }
}

/// Thread-safe analyser owned by a driver (CLI, GUI, server).
#[derive(Debug)]
pub struct Analyzer {
    current: RwLock<Arc<Snapshot>>,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(rules: RuleStore, dictionary: Dictionary) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                rules: Arc::new(rules),
                dictionary: Arc::new(dictionary),
            })),
            options: AnalyzerOptions::default(),
        }
    }

    /// Analyser over the embedded default rules and dictionary.
    pub fn with_defaults() -> Self {
        Self::new(RuleStore::new(), Dictionary::new())
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// The snapshot analyses are currently using.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn analyze_word(&self, word: &str) -> AnalysisResult {
        self.snapshot().analyze_word(word, &self.options)
    }

    /// Analyse every word of `text`, all against the same snapshot.
    pub fn analyze_text(&self, text: &str) -> Vec<AnalysisResult> {
        self.snapshot().analyze_text(text, &self.options)
    }

    /// Validate a rule document and make it active. On error the previous
    /// rules stay in effect.
    pub fn load_rules(&self, document: &Value) -> Result<()> {
        let rules = RuleStore::from_document(document)?;
        self.replace_rules(rules);
        Ok(())
    }

    /// Validate a dictionary document and make it active. On error the
    /// previous dictionary stays in effect.
    pub fn load_dictionary(&self, document: &Value) -> Result<()> {
        let dictionary = Dictionary::from_document(document)?;
        self.replace_dictionary(dictionary);
        Ok(())
    }

    pub fn replace_rules(&self, rules: RuleStore) {
        let rules = Arc::new(rules);
        let mut current = self.current.write();
        *current = Arc::new(Snapshot {
            rules,
            dictionary: Arc::clone(&current.dictionary),
        });
        info!("rule set replaced");
    }

    pub fn replace_dictionary(&self, dictionary: Dictionary) {
        let dictionary = Arc::new(dictionary);
        let mut current = self.current.write();
        *current = Arc::new(Snapshot {
            rules: Arc::clone(&current.rules),
            dictionary,
        });
        info!("dictionary replaced");
    }
}

/// Read and parse a JSON rule or dictionary document from disk, ready for
/// [`Analyzer::load_rules`] or [`Analyzer::load_dictionary`].
pub fn read_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
