//! Image-Geolocation Benchmark Reporting
//!
//! This crate turns persisted evaluation runs of vision-capable LLMs on an
//! image-geolocation task into deterministic Markdown/HTML table reports.
//! Ground-truth labels are encoded in image filenames
//! (`<index>_<label1>_<label2>.<ext>`), an external evaluation runner
//! produces one JSON log per run, and this crate loads those logs,
//! extracts a canonical result per sample, merges repeated runs per model,
//! and renders a scoreboard, one table per model, and an answer key.
//!
//! # Features
//!
//! - Defensive extraction over loosely-structured evaluation records
//!   (score value as boolean or sentinel string, filename in record or
//!   input-message metadata, completions that may be missing entirely)
//! - Accuracy summaries merged across repeated runs without double
//!   counting, plus a deduplicated first-seen-wins study set
//! - Deterministic report ordering: three-level scoreboard tie-break,
//!   natural filename sort, HTML-escaped cells and attributes
//! - Dataset construction from a directory of labeled images
//!
//! # Example
//!
//! ```no_run
//! use geobench::{
//!     analysis::aggregate,
//!     logs::load_eval_runs,
//!     reporting::{generate_reports, ReportOptions},
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runs = load_eval_runs("logs")?;
//!     let results = aggregate(&runs)?;
//!     generate_reports(
//!         &results,
//!         "images".as_ref(),
//!         "tables".as_ref(),
//!         &ReportOptions::default(),
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod logs;
pub mod reporting;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        aggregate, normalize, score_completion, Aggregate, ExtractError, ModelSummary,
        SampleResult,
    };
    pub use crate::config::Config;
    pub use crate::dataset::{dataset_from_dir, DatasetError, GeoSample};
    pub use crate::logs::{load_eval_runs, EvalRun, LoadError, SampleRecord, ScoreValue};
    pub use crate::reporting::{generate_reports, ReportError, ReportOptions};
}
