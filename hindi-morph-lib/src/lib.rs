pub mod types;
pub mod error;
pub mod normalize;
pub mod rules;
pub mod dictionary;
pub mod affix;
pub mod sandhi;
pub mod resolve;
pub mod morphology;
pub mod text;
pub mod engine;
pub mod output;
pub mod evaluate;

pub use dictionary::Dictionary;
pub use engine::{read_document, Analyzer, Snapshot};
pub use error::{MorphError, Result};
pub use morphology::{analyze_word, AnalyzerOptions};
pub use normalize::normalize;
pub use rules::RuleStore;
pub use text::analyze_text;
pub use types::{AnalysisResult, FeatureBundle, RootInfo};
