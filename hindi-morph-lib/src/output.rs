// Output formatting for analysis results.

use std::fmt::Write;

use crate::types::*;

const UNKNOWN: &str = "unknown";

/// Render results as indented text blocks, one per word:
///
/// ```text
/// Analysis 1: लड़कों
///   Root: लड़क
///   Category: noun
///   Suffix: ों
///   Features: category: noun, gender: masculine, number: plural, case: oblique
/// ```
pub fn to_text(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    for (idx, r) in results.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = write_block(&mut out, idx + 1, r);
    }
    out
}

fn write_block(out: &mut String, n: usize, r: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "Analysis {n}: {}", r.original_word)?;
    writeln!(out, "  Root: {}", r.root)?;
    writeln!(out, "  Category: {}", r.category().unwrap_or(UNKNOWN))?;
    if let Some(s) = &r.suffix_match {
        writeln!(out, "  Suffix: {}", s.suffix)?;
        writeln!(out, "  Features: {}", join_features(&s.features))?;
    }
    if let Some(p) = &r.prefix_match {
        writeln!(out, "  Prefix: {}", p.prefix)?;
        writeln!(out, "  Prefix Info: meaning: {}, type: {}", p.meaning, p.kind)?;
    }
    if let Some(adj) = &r.sandhi {
        writeln!(
            out,
            "  Sandhi: {} -> {} ({} -> {})",
            adj.boundary_before, adj.boundary_after, adj.stem_before, adj.stem_after
        )?;
    }
    if !r.root_resolved {
        writeln!(out, "  (root not in dictionary)")?;
    }
    writeln!(out)
}

fn join_features(features: &FeatureBundle) -> String {
    features
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a result to bracketed {morpheme:label} component format.
///
/// Format:
///   Prefixes: `{अ-:negative}` (trailing dash, prefix type)
///   Roots:    `{सफल:adjective}` (no dash, category)
///   Suffixes: `{-ों:noun}` (leading dash, suffix category)
pub fn to_bracketed(r: &AnalysisResult) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(p) = &r.prefix_match {
        let label = if p.kind.is_empty() { &p.meaning } else { &p.kind };
        parts.push(format!("{{{}-:{label}}}", p.prefix));
    }
    parts.push(format!("{{{}:{}}}", r.root, r.category().unwrap_or(UNKNOWN)));
    if let Some(s) = &r.suffix_match {
        let label = s
            .features
            .category
            .as_deref()
            .or(r.derived_features.category.as_deref())
            .unwrap_or(UNKNOWN);
        parts.push(format!("{{-{}:{label}}}", s.suffix));
    }
    parts.join(", ")
}

/// Bracketed format for a whole text, one word per line.
pub fn text_to_bracketed(results: &[AnalysisResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}: {}", r.original_word, to_bracketed(r)))
        .collect::<Vec<_>>()
        .join("\n")
}
