//! Merging per-record results across evaluation runs

use indexmap::IndexMap;
use serde::Serialize;

use super::extract::{extract_sample, ExtractError, SampleResult};
use crate::logs::EvalRun;

/// Accuracy summary for one model across all merged runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub num_correct: usize,
    pub total_samples: usize,
}

impl ModelSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_correct: 0,
            total_samples: 0,
        }
    }

    /// Fraction of samples answered correctly; `0.0` for an empty summary.
    pub fn accuracy(&self) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.num_correct as f64 / self.total_samples as f64
    }

    /// Merge another run's counts into this summary.
    ///
    /// Counts are summed, never averaged, so repeated runs with different
    /// sample counts are weighted by sample rather than by run.
    pub fn merge(&mut self, other: &ModelSummary) {
        self.num_correct += other.num_correct;
        self.total_samples += other.total_samples;
    }
}

/// Everything one reporting invocation needs, built fresh per call.
///
/// All three maps preserve insertion order, which makes the study set's
/// first-seen-wins rule deterministic given the loader's fixed run order.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Per-model accuracy summaries, keyed by model name.
    pub summaries: IndexMap<String, ModelSummary>,
    /// Per-model sample results, runs concatenated in load order.
    pub model_samples: IndexMap<String, Vec<SampleResult>>,
    /// One representative result per filename, first seen wins.
    pub study_set: IndexMap<String, SampleResult>,
}

/// Merge all runs into per-model summaries, per-model sample lists, and
/// the deduplicated study set.
///
/// Any extraction failure aborts the whole call; partial aggregates are
/// never returned.
pub fn aggregate(runs: &[EvalRun]) -> Result<Aggregate, ExtractError> {
    let mut result = Aggregate::default();

    for run in runs {
        let mut samples = Vec::with_capacity(run.samples.len());
        for (index, record) in run.samples.iter().enumerate() {
            samples.push(extract_sample(&run.model, index, record)?);
        }

        let mut run_summary = ModelSummary::new(&run.model);
        run_summary.num_correct = samples.iter().filter(|s| s.correct).count();
        run_summary.total_samples = samples.len();

        result
            .summaries
            .entry(run.model.clone())
            .or_insert_with(|| ModelSummary::new(&run.model))
            .merge(&run_summary);

        for sample in &samples {
            if !result.study_set.contains_key(&sample.filename) {
                result
                    .study_set
                    .insert(sample.filename.clone(), sample.clone());
            }
        }

        result
            .model_samples
            .entry(run.model.clone())
            .or_default()
            .extend(samples);
    }

    Ok(result)
}
