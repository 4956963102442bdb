//! Report generation
//!
//! Turns an [`Aggregate`] into up to three Markdown documents in the
//! output directory: the scoreboard, one table per model, and the answer
//! key. Each document is independently toggleable and written atomically
//! (temp file + rename), so a failed write never leaves a truncated
//! document behind.

pub mod tables;

pub use tables::{build_answer_key, build_model_table, build_scoreboard, render_table, slugify};

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{Aggregate, SampleResult};

/// Scoreboard document file name.
pub const SCOREBOARD_FILE: &str = "model-accuracy.md";
/// Answer-key document file name.
pub const ANSWER_KEY_FILE: &str = "answers.md";

/// Error type for report generation
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("column widths must match header count ({headers} headers, {widths} widths)")]
    ColumnWidthMismatch { headers: usize, widths: usize },
}

/// Which documents to produce.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub scoreboard: bool,
    pub model_tables: bool,
    pub answer_key: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            scoreboard: true,
            model_tables: true,
            answer_key: true,
        }
    }
}

/// Generate the selected documents, returning the paths written.
///
/// Image links inside the documents are computed relative to
/// `output_dir`, so the documents are self-contained as long as they stay
/// alongside the images they reference.
pub fn generate_reports(
    results: &Aggregate,
    images_dir: &Path,
    output_dir: &Path,
    options: &ReportOptions,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    if options.scoreboard {
        let summaries: Vec<_> = results.summaries.values().cloned().collect();
        let content = build_scoreboard(&summaries)?;
        written.push(write_document(output_dir.join(SCOREBOARD_FILE), &content)?);
    }

    if options.model_tables {
        for (model, samples) in &results.model_samples {
            let content = build_model_table(model, samples, images_dir, output_dir)?;
            let path = output_dir.join(format!("{}.md", slugify(model)));
            written.push(write_document(path, &content)?);
        }
    }

    if options.answer_key {
        let study: Vec<SampleResult> = results.study_set.values().cloned().collect();
        let content = build_answer_key(&study, images_dir, output_dir)?;
        written.push(write_document(output_dir.join(ANSWER_KEY_FILE), &content)?);
    }

    Ok(written)
}

/// Write one document to completion or not at all.
fn write_document(path: PathBuf, content: &str) -> Result<PathBuf, ReportError> {
    let tmp = path.with_extension("md.tmp");
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    tracing::info!("Wrote {}", path.display());
    Ok(path)
}
