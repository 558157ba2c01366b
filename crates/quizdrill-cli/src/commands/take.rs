//! The `quizdrill take` command.
//!
//! Runs a live timed attempt: the session actor owns the clock, stdin lines
//! drive navigation and answers, and a console sink prints the one-minute
//! warning and the completion notice as they happen.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use quizdrill_core::error::AttemptError;
use quizdrill_core::events::{AttemptEvent, EventSink};
use quizdrill_core::model::AttemptConfig;
use quizdrill_core::parser;
use quizdrill_core::report::QuizResult;
use quizdrill_core::session::AttemptSession;

/// Prints notifications as they arrive. This sink owns the celebration
/// decision; the engine only hands it the facts.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn notify(&self, event: AttemptEvent) {
        match event {
            AttemptEvent::Warning { remaining_seconds } => {
                eprintln!("\n*** {remaining_seconds} seconds left ***");
            }
            AttemptEvent::Completed { result } => {
                eprintln!(
                    "\nAttempt submitted ({}) after {}s.",
                    result.reason, result.time_taken_seconds
                );
            }
            AttemptEvent::Celebration { hint } => {
                if hint.perfect {
                    eprintln!("Perfect score!");
                } else if hint.answered_all && hint.score >= 80 {
                    eprintln!("Strong finish, nothing left blank.");
                }
            }
        }
    }
}

pub async fn execute(
    quiz_path: PathBuf,
    output: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let config = parser::parse_quiz(&quiz_path)?;
    tracing::debug!(quiz_id = %config.quiz_id, questions = config.questions.len(), "quiz loaded");
    println!(
        "{} — {} question(s), {} minute(s)",
        config.title,
        config.questions.len(),
        config.duration_minutes
    );
    println!(
        "Commands: a <option>   c(lear)   m(ark)   n(ext)   p(rev)   g <question>   status   s(ubmit)   q(uit)"
    );

    let session = AttemptSession::spawn(config.clone(), Arc::new(ConsoleSink))?;
    print_current(&session).await?;

    let mut lines = BufReader::new(io::stdin()).lines();

    let result: QuizResult = loop {
        let maybe_line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            result = wait_for_result(&session) => break result?,
        };

        // Closed stdin submits whatever is on the sheet.
        let Some(line) = maybe_line else {
            break session.submit().await?;
        };

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) => {}
            (Some("a"), Some(arg)) => match arg.parse::<usize>() {
                Ok(option) => {
                    report_outcome(session.select_answer(option).await);
                    print_current(&session).await?;
                }
                Err(_) => eprintln!("usage: a <option-number>"),
            },
            (Some("c"), _) => report_outcome(session.clear_answer().await),
            (Some("m"), _) => report_outcome(session.toggle_review().await),
            (Some("n"), _) => {
                session.next().await?;
                print_current(&session).await?;
            }
            (Some("p"), _) => {
                session.previous().await?;
                print_current(&session).await?;
            }
            (Some("g"), Some(arg)) => match arg.parse::<usize>() {
                Ok(index) => {
                    report_outcome(session.go_to(index).await);
                    print_current(&session).await?;
                }
                Err(_) => eprintln!("usage: g <question-number>"),
            },
            (Some("status"), _) => print_status(&session).await?,
            (Some("s"), _) => break session.submit().await?,
            (Some("q"), _) => {
                session.abandon().await;
                println!("Attempt abandoned.");
                return Ok(());
            }
            _ => eprintln!("unknown command"),
        }
    };

    println!();
    super::summary::print_table(&result);
    print_review(&config, &result);

    if let Some(path) = output {
        result.save_json(&path)?;
        println!("Result written to {}", path.display());
    }
    if let Some(path) = html {
        quizdrill_report::html::write_html_report(&config, &result, &path)?;
        println!("Review page written to {}", path.display());
    }

    Ok(())
}

/// Resolves once the attempt is submitted (by the user or the clock).
async fn wait_for_result(session: &AttemptSession) -> Result<QuizResult, AttemptError> {
    loop {
        if let Some(result) = session.result().await? {
            return Ok(result);
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

fn report_outcome(outcome: Result<(), AttemptError>) {
    if let Err(e) = outcome {
        eprintln!("{e}");
    }
}

async fn print_current(session: &AttemptSession) -> Result<()> {
    let snapshot = session.snapshot().await?;
    let Some((index, question)) = session.current_question().await? else {
        println!("(this quiz has no questions)");
        return Ok(());
    };

    println!(
        "\n[{}] {}  ({}, {} answered, {}s left)",
        index,
        question.prompt,
        snapshot.statuses[index],
        snapshot.answered_count,
        snapshot.remaining_seconds
    );
    for (i, option) in question.options.iter().enumerate() {
        println!("  {i}) {option}");
    }
    Ok(())
}

async fn print_status(session: &AttemptSession) -> Result<()> {
    let snapshot = session.snapshot().await?;
    println!(
        "{}s left, {} of {} answered",
        snapshot.remaining_seconds,
        snapshot.answered_count,
        snapshot.statuses.len()
    );
    for (i, status) in snapshot.statuses.iter().enumerate() {
        println!("  [{i}] {status}");
    }
    Ok(())
}

/// Review mode on the console: show every miss with the correction.
fn print_review(config: &AttemptConfig, result: &QuizResult) {
    for (record, question) in result.answers.iter().zip(&config.questions) {
        if record.is_correct {
            continue;
        }
        let selected = record
            .selected_option
            .and_then(|i| question.options.get(i).map(String::as_str))
            .unwrap_or("(unanswered)");
        let correct = question
            .options
            .get(record.correct_option)
            .map(String::as_str)
            .unwrap_or_default();
        println!("\n{}: {}", record.question_id, question.prompt);
        println!("  your answer: {selected}");
        println!("  correct:     {correct}");
        if !question.explanation.is_empty() {
            println!("  {}", question.explanation);
        }
    }
}
