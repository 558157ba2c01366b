//! The terminal result artifact with JSON persistence.
//!
//! A [`QuizResult`] is produced exactly once per attempt, by submission, and
//! is immutable from then on. Everything downstream (renderers, the CLI) is
//! a consumer.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::SubmitReason;

/// The immutable outcome of one finished attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Unique attempt identifier.
    pub attempt_id: Uuid,
    /// Quiz this attempt ran against.
    pub quiz_id: String,
    /// Percentage score, 0–100, rounded half-up.
    pub score: u32,
    /// Number of questions in the attempt.
    pub total_questions: usize,
    /// Questions answered correctly.
    pub correct_answers: usize,
    /// Questions answered incorrectly.
    pub wrong_answers: usize,
    /// Questions left unanswered.
    pub unanswered: usize,
    /// Wall-clock seconds consumed, floored at zero.
    pub time_taken_seconds: u32,
    /// What triggered the submission.
    pub reason: SubmitReason,
    /// When the attempt was finalized.
    pub submitted_at: DateTime<Utc>,
    /// Per-question outcome, in question order.
    pub answers: Vec<AnswerRecord>,
}

/// Outcome of a single question position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Identifier of the question at this position.
    pub question_id: String,
    /// The selected option index, if any.
    pub selected_option: Option<usize>,
    /// The correct option index.
    pub correct_option: usize,
    /// Whether the selection matched.
    pub is_correct: bool,
}

impl QuizResult {
    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: QuizResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {}% ({} correct, {} wrong, {} unanswered of {}) in {}s [{}]",
            self.quiz_id,
            self.score,
            self.correct_answers,
            self.wrong_answers,
            self.unanswered,
            self.total_questions,
            self.time_taken_seconds,
            self.reason,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> QuizResult {
        QuizResult {
            attempt_id: Uuid::nil(),
            quiz_id: "quiz-1".into(),
            score: 50,
            total_questions: 4,
            correct_answers: 2,
            wrong_answers: 1,
            unanswered: 1,
            time_taken_seconds: 90,
            reason: SubmitReason::UserInitiated,
            submitted_at: Utc::now(),
            answers: vec![
                AnswerRecord {
                    question_id: "q1".into(),
                    selected_option: Some(0),
                    correct_option: 0,
                    is_correct: true,
                },
                AnswerRecord {
                    question_id: "q2".into(),
                    selected_option: None,
                    correct_option: 2,
                    is_correct: false,
                },
            ],
        }
    }

    #[test]
    fn json_roundtrip() {
        let result = make_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("result.json");

        result.save_json(&path).unwrap();
        let loaded = QuizResult::load_json(&path).unwrap();

        assert_eq!(loaded, result);
    }

    #[test]
    fn load_missing_file_fails_with_path() {
        let err = QuizResult::load_json(Path::new("does-not-exist.json")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn summary_line_mentions_score_and_counts() {
        let line = make_result().summary_line();
        assert!(line.contains("50%"));
        assert!(line.contains("2 correct"));
        assert!(line.contains("1 unanswered"));
        assert!(line.contains("[user]"));
    }
}
