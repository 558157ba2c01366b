//! Deterministic attempt scoring.
//!
//! Pure functions only: classification of each answer slot and the
//! round-half-up percentage rule. The state machine in [`crate::attempt`]
//! calls [`grade`] exactly once, at submission.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{AttemptConfig, SubmitReason};
use crate::report::{AnswerRecord, QuizResult};

/// Percentage of `correct` out of `total`, rounded half-up to an integer.
///
/// A `total` of zero scores 0 rather than dividing by zero. Integer
/// arithmetic keeps exact-half cases exact: 1/8 is 12.5% and rounds to 13.
pub fn percentage_score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * correct + total) / (2 * total)) as u32
}

/// Derive the immutable result artifact from a finished answer sheet.
pub(crate) fn grade(
    config: &AttemptConfig,
    answers: &[Option<usize>],
    remaining_seconds: u32,
    reason: SubmitReason,
) -> QuizResult {
    debug_assert_eq!(answers.len(), config.questions.len());

    let mut correct = 0usize;
    let mut wrong = 0usize;
    let mut unanswered = 0usize;
    let mut records = Vec::with_capacity(config.questions.len());

    for (question, selected) in config.questions.iter().zip(answers) {
        let is_correct = *selected == Some(question.correct_option);
        match selected {
            None => unanswered += 1,
            Some(_) if is_correct => correct += 1,
            Some(_) => wrong += 1,
        }
        records.push(AnswerRecord {
            question_id: question.id.clone(),
            selected_option: *selected,
            correct_option: question.correct_option,
            is_correct,
        });
    }

    QuizResult {
        attempt_id: Uuid::new_v4(),
        quiz_id: config.quiz_id.clone(),
        score: percentage_score(correct, config.questions.len()),
        total_questions: config.questions.len(),
        correct_answers: correct,
        wrong_answers: wrong,
        unanswered,
        time_taken_seconds: config.duration_seconds().saturating_sub(remaining_seconds),
        reason,
        submitted_at: Utc::now(),
        answers: records,
    }
}
