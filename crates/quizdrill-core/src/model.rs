//! Core data model types for quizdrill.
//!
//! These are the value objects the rest of the system builds on: questions,
//! the per-attempt configuration, and the small status enums shared between
//! the state machine and its consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AttemptError;

/// A single multiple-choice question.
///
/// Owned by the attempt configuration and addressed by position; the attempt
/// itself never copies question data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the quiz.
    pub id: String,
    /// The question text shown to the taker.
    pub prompt: String,
    /// Fixed, index-addressed option list.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option: usize,
    /// Explanation revealed in review mode.
    #[serde(default)]
    pub explanation: String,
    /// Topic tag for filtering and review grouping.
    #[serde(default)]
    pub topic: String,
}

/// Configuration for one timed attempt: quiz identity, time budget, and the
/// ordered question sequence. Immutable for the attempt's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptConfig {
    /// Quiz identifier.
    pub quiz_id: String,
    /// Human-readable title.
    pub title: String,
    /// Subject the quiz belongs to.
    #[serde(default)]
    pub subject: String,
    /// Time budget in minutes. Zero expires the attempt immediately.
    pub duration_minutes: u32,
    /// Ordered question sequence. May be empty (degenerate but valid).
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl AttemptConfig {
    /// Time budget in seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.duration_minutes.saturating_mul(60)
    }

    /// Check construction invariants.
    ///
    /// Every question must have a non-empty option list and a
    /// `correct_option` that indexes into it. An empty question list is a
    /// valid degenerate quiz, not an error.
    pub fn validate(&self) -> Result<(), AttemptError> {
        for (position, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(AttemptError::Config(format!(
                    "question {position} ({}) has no options",
                    question.id
                )));
            }
            if question.correct_option >= question.options.len() {
                return Err(AttemptError::Config(format!(
                    "question {position} ({}) marks option {} correct but has only {} option(s)",
                    question.id,
                    question.correct_option,
                    question.options.len()
                )));
            }
        }
        Ok(())
    }
}

/// What triggered an attempt's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitReason {
    /// The taker submitted explicitly.
    UserInitiated,
    /// The countdown reached zero.
    Timeout,
}

impl fmt::Display for SubmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitReason::UserInitiated => write!(f, "user"),
            SubmitReason::Timeout => write!(f, "timeout"),
        }
    }
}

/// Presentation status of one question position.
///
/// The review mark always wins: a question that is both answered and marked
/// for review reports as `MarkedForReview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Unanswered,
    Answered,
    MarkedForReview,
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionStatus::Unanswered => write!(f, "unanswered"),
            QuestionStatus::Answered => write!(f, "answered"),
            QuestionStatus::MarkedForReview => write!(f, "marked"),
        }
    }
}
