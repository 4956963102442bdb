//! Result extraction and aggregation

pub mod aggregate;
pub mod extract;
pub mod scoring;

pub use aggregate::{aggregate, Aggregate, ModelSummary};
pub use extract::{extract_sample, ExtractError, SampleResult, MISSING_COMPLETION_PLACEHOLDER};
pub use scoring::{classify_score, normalize, score_completion, UnscorableScore, CORRECT, INCORRECT};
