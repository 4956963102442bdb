//! Evaluation-log data model
//!
//! One JSON file per evaluation run, emitted by the external evaluation
//! runner. Records are only loosely structured: depending on which scoring
//! path produced a run, fields may be absent or carry one of several
//! shapes, so everything that can be missing in practice is optional here
//! and the extractor decides which absences are fatal.

pub mod loader;

pub use loader::{load_eval_runs, LoadError, LOG_EXTENSION};

use serde::{Deserialize, Serialize};

/// One completed evaluation run of a single model over the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRun {
    /// Model identifier, e.g. `openrouter/openai/gpt-5.2`
    pub model: String,
    #[serde(default)]
    pub samples: Vec<SampleRecord>,
}

/// A single (image, model answer) record within a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Sample identifier; runners conventionally set this to the image
    /// filename.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<RecordMetadata>,
    /// Ordered conversation input; the first message carries the dataset
    /// metadata when record-level metadata is absent.
    #[serde(default)]
    pub input: Vec<InputMessage>,
    #[serde(default)]
    pub output: Option<ModelOutput>,
    #[serde(default)]
    pub score: Option<Score>,
    /// Ordered list of acceptable ground-truth labels.
    #[serde(default)]
    pub target: Vec<String>,
}

/// Metadata attached to a record or to an input message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub filename: Option<String>,
}

/// One message of the conversation input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub metadata: Option<RecordMetadata>,
}

/// The model's generated output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelOutput {
    #[serde(default)]
    pub completion: Option<String>,
}

/// Score attached to a record by whichever scorer produced the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub value: Option<ScoreValue>,
    /// Normalized answer stored by the scorer, kept for debugging.
    #[serde(default)]
    pub answer: Option<String>,
}

/// Closed set of score-value shapes.
///
/// Known scoring paths emit either a boolean or a sentinel string; any
/// other JSON shape is preserved as [`ScoreValue::Other`] so a bad score
/// fails correctness classification for that one sample instead of
/// failing deserialization of the whole run file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Bool(bool),
    Str(String),
    Other(serde_json::Value),
}

impl SampleRecord {
    /// Filename recovery chain: record metadata, then the first input
    /// message's metadata, then the sample id. An empty string counts as
    /// absent at each step, so the chain falls through to the next
    /// source instead of stopping on a blank value.
    pub fn filename(&self) -> Option<&str> {
        let present = |f: &&str| !f.is_empty();
        self.metadata
            .as_ref()
            .and_then(|m| m.filename.as_deref())
            .filter(present)
            .or_else(|| {
                self.input
                    .first()
                    .and_then(|msg| msg.metadata.as_ref())
                    .and_then(|m| m.filename.as_deref())
                    .filter(present)
            })
            .or_else(|| self.id.as_deref().filter(present))
    }

    /// The model's raw completion text, if any was recorded.
    pub fn completion(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.completion.as_deref())
            .filter(|c| !c.is_empty())
    }
}
