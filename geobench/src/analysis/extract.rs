//! Canonical per-sample extraction from loose evaluation records

use serde::Serialize;

use super::scoring::classify_score;
use crate::logs::SampleRecord;

/// Rendered in place of a completion the runner failed to record.
pub const MISSING_COMPLETION_PLACEHOLDER: &str = "(no completion)";

/// The canonical per-sample outcome, joined back to its source image by
/// `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    pub filename: String,
    /// Raw model output; never empty (a placeholder stands in when the
    /// runner recorded nothing).
    pub completion: String,
    pub correct: bool,
    /// Acceptable labels, order and duplicates preserved as given.
    pub targets: Vec<String>,
}

/// Error type for record extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("sample {index} in run for {model} is missing a filename identifier")]
    MissingIdentifier { model: String, index: usize },

    #[error("unable to determine correctness for sample {filename} in run for {model}")]
    Unscorable { model: String, filename: String },
}

/// Extract a [`SampleResult`] from one raw record.
///
/// A missing filename or an unscorable record is an error: defaulting
/// either one would silently corrupt the image join or fabricate accuracy
/// counts. A missing completion is not — an empty answer is a legitimate
/// (likely wrong) outcome that must still be counted and rendered, so it
/// gets a placeholder and a warning instead.
pub fn extract_sample(
    model: &str,
    index: usize,
    record: &SampleRecord,
) -> Result<SampleResult, ExtractError> {
    let filename = record
        .filename()
        .ok_or_else(|| ExtractError::MissingIdentifier {
            model: model.to_string(),
            index,
        })?
        .to_string();

    let completion = match record.completion() {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!("No completion recorded for {} ({})", filename, model);
            MISSING_COMPLETION_PLACEHOLDER.to_string()
        }
    };

    let correct = classify_score(record.score.as_ref()).map_err(|_| ExtractError::Unscorable {
        model: model.to_string(),
        filename: filename.clone(),
    })?;

    if record.target.is_empty() {
        tracing::warn!("Sample {} ({}) has no target labels", filename, model);
    }

    Ok(SampleResult {
        filename,
        completion,
        correct,
        targets: record.target.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::SampleRecord;

    fn record(json: serde_json::Value) -> SampleRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_extracts_all_fields() {
        let rec = record(serde_json::json!({
            "metadata": {"filename": "7_paris_france.jpg"},
            "output": {"completion": "Paris"},
            "score": {"value": "C"},
            "target": ["paris", "france"]
        }));

        let result = extract_sample("x", 0, &rec).unwrap();
        assert_eq!(result.filename, "7_paris_france.jpg");
        assert_eq!(result.completion, "Paris");
        assert!(result.correct);
        assert_eq!(result.targets, ["paris", "france"]);
    }

    #[test]
    fn test_missing_completion_gets_placeholder() {
        let rec = record(serde_json::json!({
            "metadata": {"filename": "2_tokyo.jpg"},
            "score": {"value": false},
            "target": ["tokyo"]
        }));

        let result = extract_sample("x", 1, &rec).unwrap();
        assert_eq!(result.completion, MISSING_COMPLETION_PLACEHOLDER);
        assert!(!result.correct);
    }

    #[test]
    fn test_missing_filename_is_fatal() {
        let rec = record(serde_json::json!({
            "output": {"completion": "Paris"},
            "score": {"value": true},
            "target": ["paris"]
        }));

        assert_eq!(
            extract_sample("m", 3, &rec),
            Err(ExtractError::MissingIdentifier {
                model: "m".to_string(),
                index: 3
            })
        );
    }

    #[test]
    fn test_unscorable_record_is_fatal() {
        let rec = record(serde_json::json!({
            "metadata": {"filename": "1_oslo.jpg"},
            "output": {"completion": "Oslo"},
            "target": ["oslo"]
        }));

        assert_eq!(
            extract_sample("m", 0, &rec),
            Err(ExtractError::Unscorable {
                model: "m".to_string(),
                filename: "1_oslo.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_boolean_score_wins_over_completion_text() {
        // A true boolean score is trusted even when the completion text
        // does not match any target.
        let rec = record(serde_json::json!({
            "metadata": {"filename": "5_rome.jpg"},
            "output": {"completion": "definitely not rome"},
            "score": {"value": true},
            "target": ["rome"]
        }));

        assert!(extract_sample("m", 0, &rec).unwrap().correct);
    }
}
