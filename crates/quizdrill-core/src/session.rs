//! The single-writer attempt session.
//!
//! [`AttemptSession`] owns an [`Attempt`] inside a spawned task. All
//! mutation, user commands and clock ticks alike, is serialized through
//! that task's select loop, so attempt invariants never observe a partial
//! update. The loop is `biased` with the tick arm first: when a tick and a
//! user command are eligible at the same instant, the tick wins
//! (tick-before-action). An attempt expiring at the moment of a user submit
//! therefore yields exactly one result, with reason
//! [`SubmitReason::Timeout`].
//!
//! The tick arm is guard-disabled the moment the attempt is submitted, and
//! the task exits when the handle is dropped or [`AttemptSession::abandon`]
//! is called, so a finalized or abandoned attempt can never be mutated by a
//! dangling tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;

use crate::attempt::{Attempt, Tick};
use crate::error::AttemptError;
use crate::events::{AttemptEvent, CelebrationHint, EventSink};
use crate::model::{AttemptConfig, Question, QuestionStatus, SubmitReason};
use crate::report::QuizResult;

/// A consistent point-in-time view of the attempt, for display layers.
#[derive(Debug, Clone)]
pub struct AttemptSnapshot {
    pub current_index: usize,
    pub remaining_seconds: u32,
    pub answered_count: usize,
    pub submitted: bool,
    /// Status per question position, in question order.
    pub statuses: Vec<QuestionStatus>,
}

enum Command {
    SelectAnswer(usize, oneshot::Sender<Result<(), AttemptError>>),
    ClearAnswer(oneshot::Sender<Result<(), AttemptError>>),
    ToggleReview(oneshot::Sender<Result<(), AttemptError>>),
    GoTo(usize, oneshot::Sender<Result<(), AttemptError>>),
    Next(oneshot::Sender<usize>),
    Previous(oneshot::Sender<usize>),
    Submit(oneshot::Sender<QuizResult>),
    CurrentQuestion(oneshot::Sender<Option<(usize, Question)>>),
    Result(oneshot::Sender<Option<QuizResult>>),
    Snapshot(oneshot::Sender<AttemptSnapshot>),
}

/// Handle to a live attempt.
///
/// Dropping the handle closes the command channel; the session task then
/// exits on its next loop turn, taking the clock with it.
pub struct AttemptSession {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl AttemptSession {
    /// Validate the configuration and spawn the session task.
    ///
    /// A zero-duration attempt is submitted as [`SubmitReason::Timeout`]
    /// before the first command is served; it never hangs.
    pub fn spawn(
        config: AttemptConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, AttemptError> {
        let attempt = Attempt::new(config)?;
        tracing::debug!(
            quiz_id = %attempt.config().quiz_id,
            questions = attempt.len(),
            duration_seconds = attempt.remaining_seconds(),
            "attempt session started"
        );
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(attempt, rx, sink));
        Ok(Self { tx, task })
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, AttemptError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .map_err(|_| AttemptError::SessionClosed)?;
        reply_rx.await.map_err(|_| AttemptError::SessionClosed)
    }

    /// Record an answer to the current question.
    pub async fn select_answer(&self, option: usize) -> Result<(), AttemptError> {
        self.request(|tx| Command::SelectAnswer(option, tx)).await?
    }

    /// Clear the answer to the current question.
    pub async fn clear_answer(&self) -> Result<(), AttemptError> {
        self.request(Command::ClearAnswer).await?
    }

    /// Flip the review mark on the current question.
    pub async fn toggle_review(&self) -> Result<(), AttemptError> {
        self.request(Command::ToggleReview).await?
    }

    /// Jump to a question position.
    pub async fn go_to(&self, index: usize) -> Result<(), AttemptError> {
        self.request(|tx| Command::GoTo(index, tx)).await?
    }

    /// Advance one position (clamped). Returns the new position.
    pub async fn next(&self) -> Result<usize, AttemptError> {
        self.request(Command::Next).await
    }

    /// Step back one position (clamped). Returns the new position.
    pub async fn previous(&self) -> Result<usize, AttemptError> {
        self.request(Command::Previous).await
    }

    /// Submit the attempt as user-initiated. Idempotent; if the clock got
    /// there first the existing timeout result is returned unchanged.
    pub async fn submit(&self) -> Result<QuizResult, AttemptError> {
        self.request(Command::Submit).await
    }

    /// The question under the pointer with its position, if any.
    pub async fn current_question(&self) -> Result<Option<(usize, Question)>, AttemptError> {
        self.request(Command::CurrentQuestion).await
    }

    /// The result artifact, once submitted.
    pub async fn result(&self) -> Result<Option<QuizResult>, AttemptError> {
        self.request(Command::Result).await
    }

    /// A consistent view of the whole attempt.
    pub async fn snapshot(&self) -> Result<AttemptSnapshot, AttemptError> {
        self.request(Command::Snapshot).await
    }

    /// Abandon the attempt: close the command channel and wait for the
    /// session task (and its clock) to wind down.
    pub async fn abandon(self) {
        let Self { tx, task } = self;
        drop(tx);
        let _ = task.await;
    }
}

async fn run(
    mut attempt: Attempt,
    mut rx: mpsc::UnboundedReceiver<Command>,
    sink: Arc<dyn EventSink>,
) {
    // Expire a zero-budget attempt up front rather than waiting a tick.
    if attempt.remaining_seconds() == 0 && !attempt.is_submitted() {
        let result = attempt.submit(SubmitReason::Timeout).clone();
        notify_completed(&*sink, result);
    }

    let mut ticker = time::interval(Duration::from_secs(1));
    // An interval's first tick completes immediately; consume it so the
    // countdown starts a full second after spawn.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            _ = ticker.tick(), if !attempt.is_submitted() => {
                match attempt.tick() {
                    Tick::Warning => sink.notify(AttemptEvent::Warning {
                        remaining_seconds: attempt.remaining_seconds(),
                    }),
                    Tick::Expired => {
                        tracing::debug!(
                            quiz_id = %attempt.config().quiz_id,
                            "attempt expired, submitted as timeout"
                        );
                        if let Some(result) = attempt.result().cloned() {
                            notify_completed(&*sink, result);
                        }
                    }
                    Tick::Running | Tick::Idle => {}
                }
            }

            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                handle_command(&mut attempt, &*sink, cmd);
            }
        }
    }
}

fn handle_command(attempt: &mut Attempt, sink: &dyn EventSink, cmd: Command) {
    match cmd {
        Command::SelectAnswer(option, reply) => {
            let _ = reply.send(attempt.select_answer(option));
        }
        Command::ClearAnswer(reply) => {
            let _ = reply.send(attempt.clear_answer());
        }
        Command::ToggleReview(reply) => {
            let _ = reply.send(attempt.toggle_review());
        }
        Command::GoTo(index, reply) => {
            let _ = reply.send(attempt.go_to(index));
        }
        Command::Next(reply) => {
            let _ = reply.send(attempt.next());
        }
        Command::Previous(reply) => {
            let _ = reply.send(attempt.previous());
        }
        Command::Submit(reply) => {
            let first = !attempt.is_submitted();
            let result = attempt.submit(SubmitReason::UserInitiated).clone();
            if first {
                notify_completed(sink, result.clone());
            }
            let _ = reply.send(result);
        }
        Command::CurrentQuestion(reply) => {
            let current = attempt
                .current_question()
                .cloned()
                .map(|question| (attempt.current_index(), question));
            let _ = reply.send(current);
        }
        Command::Result(reply) => {
            let _ = reply.send(attempt.result().cloned());
        }
        Command::Snapshot(reply) => {
            let statuses = (0..attempt.len())
                .filter_map(|i| attempt.question_status(i).ok())
                .collect();
            let _ = reply.send(AttemptSnapshot {
                current_index: attempt.current_index(),
                remaining_seconds: attempt.remaining_seconds(),
                answered_count: attempt.answered_count(),
                submitted: attempt.is_submitted(),
                statuses,
            });
        }
    }
}

fn notify_completed(sink: &dyn EventSink, result: QuizResult) {
    let hint = CelebrationHint::from_result(&result);
    sink.notify(AttemptEvent::Completed { result });
    sink.notify(AttemptEvent::Celebration { hint });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<AttemptEvent>>);

    impl RecordingSink {
        fn completed_count(&self) -> usize {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, AttemptEvent::Completed { .. }))
                .count()
        }

        fn warning_count(&self) -> usize {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|e| matches!(e, AttemptEvent::Warning { .. }))
                .count()
        }
    }

    impl EventSink for RecordingSink {
        fn notify(&self, event: AttemptEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn question(id: &str, correct: usize) -> Question {
        Question {
            id: id.into(),
            prompt: format!("prompt {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: correct,
            explanation: String::new(),
            topic: String::new(),
        }
    }

    fn config(n: usize, duration_minutes: u32) -> AttemptConfig {
        AttemptConfig {
            quiz_id: "quiz-1".into(),
            title: "Quiz".into(),
            subject: String::new(),
            duration_minutes,
            questions: (0..n).map(|i| question(&format!("q{i}"), i % 4)).collect(),
        }
    }

    fn spawn(n: usize, duration_minutes: u32) -> (AttemptSession, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let session =
            AttemptSession::spawn(config(n, duration_minutes), sink.clone()).unwrap();
        (session, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn commands_round_trip_through_the_actor() {
        let (session, _sink) = spawn(4, 2);

        session.select_answer(1).await.unwrap();
        session.go_to(2).await.unwrap();
        session.select_answer(2).await.unwrap();
        session.toggle_review().await.unwrap();
        assert_eq!(session.next().await.unwrap(), 3);
        assert_eq!(session.previous().await.unwrap(), 2);

        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.answered_count, 2);
        assert_eq!(snapshot.current_index, 2);
        assert_eq!(snapshot.statuses[0], QuestionStatus::Answered);
        assert_eq!(snapshot.statuses[2], QuestionStatus::MarkedForReview);
        assert!(!snapshot.submitted);

        let err = session.go_to(9).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test(start_paused = true)]
    async fn warning_fires_exactly_once() {
        let (session, sink) = spawn(1, 2);
        // Round-trip once so the actor has created its interval.
        session.snapshot().await.unwrap();

        time::advance(Duration::from_secs(60)).await;
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.remaining_seconds, 60);
        assert_eq!(sink.warning_count(), 1);

        time::advance(Duration::from_secs(30)).await;
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.remaining_seconds, 30);
        assert_eq!(sink.warning_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_submits_once_and_stops_the_clock() {
        let (session, sink) = spawn(2, 2);
        session.snapshot().await.unwrap();
        session.select_answer(0).await.unwrap();

        time::advance(Duration::from_secs(120)).await;
        let snapshot = session.snapshot().await.unwrap();
        assert!(snapshot.submitted);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.completed_count(), 1);

        let result = session.result().await.unwrap().unwrap();
        assert_eq!(result.reason, SubmitReason::Timeout);
        assert_eq!(result.time_taken_seconds, 120);

        // The tick arm is disabled; nothing changes however long we wait.
        time::advance(Duration::from_secs(60)).await;
        let later = session.result().await.unwrap().unwrap();
        assert_eq!(later, result);
        assert_eq!(sink.completed_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_beats_user_submit_at_zero() {
        let (session, sink) = spawn(1, 1);
        session.snapshot().await.unwrap();

        // Make the final tick and the user submit eligible at the same
        // instant; biased ordering must let the tick win.
        time::advance(Duration::from_secs(60)).await;
        let result = session.submit().await.unwrap();

        assert_eq!(result.reason, SubmitReason::Timeout);
        assert_eq!(sink.completed_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn user_submit_emits_completed_and_celebration() {
        let (session, sink) = spawn(4, 2);
        for i in 0..4 {
            session.go_to(i).await.unwrap();
            session.select_answer(i % 4).await.unwrap();
        }
        let result = session.submit().await.unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, SubmitReason::UserInitiated);

        let events = sink.0.lock().unwrap();
        assert!(matches!(
            &events[..],
            [
                AttemptEvent::Completed { .. },
                AttemptEvent::Celebration { hint }
            ] if hint.perfect && hint.answered_all
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_is_idempotent_across_the_handle() {
        let (session, sink) = spawn(4, 2);
        let first = session.submit().await.unwrap();
        let second = session.submit().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(sink.completed_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn mutation_rejected_after_submit_navigation_allowed() {
        let (session, _sink) = spawn(4, 2);
        session.submit().await.unwrap();

        let err = session.select_answer(0).await.unwrap_err();
        assert!(matches!(err, AttemptError::AlreadySubmitted));
        let err = session.toggle_review().await.unwrap_err();
        assert!(matches!(err, AttemptError::AlreadySubmitted));

        // Review mode: browsing still works.
        session.go_to(3).await.unwrap();
        let (index, question) = session.current_question().await.unwrap().unwrap();
        assert_eq!(index, 3);
        assert_eq!(question.id, "q3");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_submits_immediately() {
        let (session, sink) = spawn(3, 0);
        let result = session.result().await.unwrap().unwrap();
        assert_eq!(result.reason, SubmitReason::Timeout);
        assert_eq!(result.unanswered, 3);
        assert_eq!(result.time_taken_seconds, 0);
        assert_eq!(sink.completed_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_quiz_submits_without_error() {
        let (session, _sink) = spawn(0, 1);
        let result = session.submit().await.unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_detaches_the_clock() {
        let (session, sink) = spawn(1, 1);
        session.snapshot().await.unwrap();
        session.abandon().await;

        // The attempt would have expired by now if the clock were still
        // running; no completion event may appear.
        time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert_eq!(sink.completed_count(), 0);
    }
}
