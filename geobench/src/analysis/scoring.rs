//! Answer normalization and correctness classification

use std::sync::OnceLock;

use regex::Regex;

use crate::logs::{Score, ScoreValue};

/// Sentinel value a string score carries when the answer was correct.
pub const CORRECT: &str = "C";
/// Sentinel value a string score carries when the answer was incorrect.
pub const INCORRECT: &str = "I";

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Canonicalize an answer or target label for comparison: strip all
/// whitespace (including internal runs) and lowercase.
///
/// Must be applied identically to both sides of a comparison; idempotent.
pub fn normalize(text: &str) -> String {
    whitespace_re().replace_all(text, "").to_lowercase()
}

/// Score a raw completion against the acceptable target labels.
///
/// This is the producer side of the sentinel that [`classify_score`]
/// consumes: the evaluation runner calls it at eval time and persists the
/// resulting [`Score`] on the record.
pub fn score_completion(raw: &str, targets: &[String]) -> Score {
    let answer = normalize(raw);
    let correct = targets.iter().any(|t| normalize(t) == answer);
    let value = if correct { CORRECT } else { INCORRECT };
    Score {
        value: Some(ScoreValue::Str(value.to_string())),
        answer: Some(answer),
    }
}

/// A record's correctness could not be determined from its score.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("score value is missing or has an unrecognized shape")]
pub struct UnscorableScore;

/// Determine correctness from a record's score.
///
/// Interpretations are tried in a fixed priority order: an explicit
/// boolean is used directly; a string is compared against the [`CORRECT`]
/// sentinel (the scorer already normalized before storing, so no
/// re-normalization happens here). Anything else is an error — correctness
/// is never silently assumed false, because records from a scoring path
/// this crate does not recognize must surface as data errors, not as
/// fabricated incorrect answers.
pub fn classify_score(score: Option<&Score>) -> Result<bool, UnscorableScore> {
    match score.and_then(|s| s.value.as_ref()) {
        Some(ScoreValue::Bool(b)) => Ok(*b),
        Some(ScoreValue::Str(s)) => Ok(s == CORRECT),
        Some(ScoreValue::Other(_)) | None => Err(UnscorableScore),
    }
}
