//! The attempt state machine.
//!
//! [`Attempt`] owns every piece of per-attempt mutable state: the question
//! pointer, the answer sheet, the review marks, and the countdown. All
//! methods are synchronous and deterministic, including the clock edge
//! logic in [`Attempt::tick`]; the wall-clock coupling lives in
//! [`crate::session`].
//!
//! Invariants held at all times: the answer sheet and review marks have the
//! same length as the question sequence; the pointer stays in range while
//! any questions exist; once submitted, answers, review marks, and the
//! remaining time are frozen.

use crate::error::AttemptError;
use crate::model::{AttemptConfig, Question, QuestionStatus, SubmitReason};
use crate::report::QuizResult;
use crate::scoring;

/// Outcome of one clock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remains and no edge was crossed.
    Running,
    /// The countdown just reached 60 seconds. Fires at most once.
    Warning,
    /// The countdown just reached zero; the attempt has been submitted with
    /// [`SubmitReason::Timeout`] by the time the caller sees this.
    Expired,
    /// The attempt is already submitted; the clock is frozen.
    Idle,
}

/// One timed run through a fixed, ordered question sequence.
#[derive(Debug, Clone)]
pub struct Attempt {
    config: AttemptConfig,
    current: usize,
    answers: Vec<Option<usize>>,
    review_marks: Vec<bool>,
    remaining_seconds: u32,
    warning_fired: bool,
    outcome: Option<QuizResult>,
}

impl Attempt {
    /// Start a new attempt.
    ///
    /// Fails with [`AttemptError::Config`] if the configuration violates a
    /// construction invariant. An empty question list is accepted.
    pub fn new(config: AttemptConfig) -> Result<Self, AttemptError> {
        config.validate()?;
        let n = config.questions.len();
        let remaining_seconds = config.duration_seconds();
        Ok(Self {
            config,
            current: 0,
            answers: vec![None; n],
            review_marks: vec![false; n],
            remaining_seconds,
            warning_fired: false,
            outcome: None,
        })
    }

    fn out_of_range(&self, index: usize) -> AttemptError {
        AttemptError::OutOfRange {
            index,
            len: self.len(),
        }
    }

    fn ensure_open(&self) -> Result<(), AttemptError> {
        if self.is_submitted() {
            Err(AttemptError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    // --- queries ---

    /// The configuration this attempt runs against.
    pub fn config(&self) -> &AttemptConfig {
        &self.config
    }

    /// Number of questions in the attempt.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether the attempt has no questions.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Current question position.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question under the pointer, or `None` for an empty quiz.
    pub fn current_question(&self) -> Option<&Question> {
        self.config.questions.get(self.current)
    }

    /// The selected option at position `index`.
    pub fn answer(&self, index: usize) -> Result<Option<usize>, AttemptError> {
        self.answers
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Number of answered positions.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    /// Status of position `index`, with priority
    /// `MarkedForReview > Answered > Unanswered`.
    pub fn question_status(&self, index: usize) -> Result<QuestionStatus, AttemptError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        Ok(if self.review_marks[index] {
            QuestionStatus::MarkedForReview
        } else if self.answers[index].is_some() {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        })
    }

    /// Seconds left on the countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Whether the attempt has been finalized.
    pub fn is_submitted(&self) -> bool {
        self.outcome.is_some()
    }

    /// The result artifact; `Some` once submitted.
    pub fn result(&self) -> Option<&QuizResult> {
        self.outcome.as_ref()
    }

    // --- navigation (legal before and after submission) ---

    /// Jump to `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), AttemptError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        self.current = index;
        Ok(())
    }

    /// Advance one position, clamped at the last question. Returns the new
    /// position.
    pub fn next(&mut self) -> usize {
        if self.current + 1 < self.len() {
            self.current += 1;
        }
        self.current
    }

    /// Step back one position, clamped at the first question. Returns the
    /// new position.
    pub fn previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    // --- mutators (illegal after submission) ---

    /// Record `option` as the answer to the current question.
    pub fn select_answer(&mut self, option: usize) -> Result<(), AttemptError> {
        self.ensure_open()?;
        let option_count = self
            .current_question()
            .map(|question| question.options.len())
            .unwrap_or(0);
        if option >= option_count {
            return Err(AttemptError::OutOfRange {
                index: option,
                len: option_count,
            });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Clear the answer to the current question.
    pub fn clear_answer(&mut self) -> Result<(), AttemptError> {
        self.ensure_open()?;
        if let Some(slot) = self.answers.get_mut(self.current) {
            *slot = None;
        }
        Ok(())
    }

    /// Flip the review mark on the current question. Never affects scoring.
    pub fn toggle_review(&mut self) -> Result<(), AttemptError> {
        self.ensure_open()?;
        if let Some(mark) = self.review_marks.get_mut(self.current) {
            *mark = !*mark;
        }
        Ok(())
    }

    // --- clock ---

    /// Apply one one-second clock decrement.
    ///
    /// Edge-triggered: [`Tick::Warning`] is returned exactly once, at the
    /// tick where the countdown first reaches 60, and [`Tick::Expired`]
    /// exactly once, at the tick where it reaches zero; the timeout
    /// submission has already happened by then. Ticks after submission are
    /// [`Tick::Idle`] and change nothing.
    pub fn tick(&mut self) -> Tick {
        if self.is_submitted() {
            return Tick::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.submit(SubmitReason::Timeout);
            return Tick::Expired;
        }
        if self.remaining_seconds == 60 && !self.warning_fired {
            self.warning_fired = true;
            return Tick::Warning;
        }
        Tick::Running
    }

    // --- submission ---

    /// Finalize the attempt.
    ///
    /// Idempotent: the first call derives and records the result; later
    /// calls return the recorded result unchanged, whatever their `reason`.
    pub fn submit(&mut self, reason: SubmitReason) -> &QuizResult {
        let remaining_seconds = self.remaining_seconds;
        self.outcome.get_or_insert_with(|| {
            scoring::grade(&self.config, &self.answers, remaining_seconds, reason)
        })
    }
}
