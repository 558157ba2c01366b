//! Notification events emitted by an attempt session.
//!
//! The core dispatches these fire-and-forget after its own state changes.
//! Sinks own every presentational decision (sound, confetti, celebration
//! tier) and any streak state behind it; the core reads none of that.

use serde::Serialize;

use crate::report::QuizResult;

/// Tagged event stream handed to an [`EventSink`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AttemptEvent {
    /// One minute left. Edge-triggered, fires at most once per attempt.
    #[serde(rename = "warning-60s")]
    Warning { remaining_seconds: u32 },
    /// The attempt was finalized. Carries the terminal artifact; emitted
    /// exactly once.
    Completed { result: QuizResult },
    /// Facts for an optional celebration, emitted right after `Completed`.
    Celebration { hint: CelebrationHint },
}

/// What a sink needs to pick a celebration tier. The tier decision itself
/// belongs to the sink.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CelebrationHint {
    /// Final percentage score.
    pub score: u32,
    /// Every question answered correctly.
    pub perfect: bool,
    /// No question left unanswered.
    pub answered_all: bool,
}

impl CelebrationHint {
    pub(crate) fn from_result(result: &QuizResult) -> Self {
        Self {
            score: result.score,
            perfect: result.total_questions > 0
                && result.correct_answers == result.total_questions,
            answered_all: result.unanswered == 0,
        }
    }
}

/// Receives attempt notifications.
///
/// Calls are synchronous and must not block; a sink that wants to do real
/// work should hand the event off to its own task.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: AttemptEvent);
}

/// Sink that drops every event.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn notify(&self, _: AttemptEvent) {}
}
