//! Error types for rule and dictionary loading.
//!
//! Only document-level failures surface as errors. Per-word outcomes such as
//! an unresolved root or a word with no matching affix are ordinary
//! [`AnalysisResult`](crate::types::AnalysisResult)s.

use std::io;

use thiserror::Error;

/// Errors raised while loading or exporting analyser configuration.
#[derive(Error, Debug)]
pub enum MorphError {
    /// The document parsed, but its shape is unusable (e.g., the top level
    /// or a whole section is not a mapping).
    #[error("malformed configuration: {0}")]
    ConfigMalformed(String),

    /// The text is not JSON at all.
    #[error("configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MorphError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        MorphError::ConfigMalformed(msg.into())
    }
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, MorphError>;
