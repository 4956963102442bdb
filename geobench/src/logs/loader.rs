//! Evaluation-log discovery and deserialization

use std::path::Path;

use super::EvalRun;

/// File extension recognized as an evaluation-run log.
pub const LOG_EXTENSION: &str = "json";

/// Error type for log loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("log directory not found: {0}")]
    NotFound(String),

    #[error("no .json log files found in {0}")]
    Empty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Load every evaluation run found in `dir`.
///
/// Runs are returned in lexicographic order of their file names; that
/// order is the tie-break source for the study set's first-seen-wins
/// rule, so it must stay stable across invocations.
pub fn load_eval_runs(dir: impl AsRef<Path>) -> Result<Vec<EvalRun>, LoadError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoadError::NotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str());
        if path.is_file() && ext == Some(LOG_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(LoadError::Empty(dir.display().to_string()));
    }

    let mut runs = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path)?;
        let run: EvalRun = serde_json::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            "Loaded {} ({} samples for {})",
            path.display(),
            run.samples.len(),
            run.model
        );
        runs.push(run);
    }

    Ok(runs)
}
