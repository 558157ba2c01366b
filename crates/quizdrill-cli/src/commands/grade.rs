//! The `quizdrill grade` command.
//!
//! Scores a recorded answer sheet against a quiz without running the live
//! clock: the sheet is applied to a fresh attempt, the recorded time is
//! replayed as ticks, and the attempt is submitted.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdrill_core::attempt::{Attempt, Tick};
use quizdrill_core::model::SubmitReason;
use quizdrill_core::parser;

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    time_taken: u32,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = parser::parse_quiz(&quiz_path)?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answer sheet: {}", answers_path.display()))?;
    let sheet: Vec<Option<usize>> =
        serde_json::from_str(&content).context("failed to parse answer sheet JSON")?;

    anyhow::ensure!(
        sheet.len() == config.questions.len(),
        "answer sheet has {} entries but the quiz has {} question(s)",
        sheet.len(),
        config.questions.len()
    );

    let mut attempt = Attempt::new(config)?;
    for (index, selected) in sheet.iter().enumerate() {
        if let Some(option) = selected {
            attempt.go_to(index)?;
            attempt.select_answer(*option)?;
        }
    }

    // Replay the recorded time; a sheet that overran the budget times out
    // exactly like a live attempt would.
    for _ in 0..time_taken {
        if attempt.tick() == Tick::Expired {
            break;
        }
    }
    let result = attempt.submit(SubmitReason::UserInitiated).clone();

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", quizdrill_report::text::to_markdown(&result));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            println!("{}", result.summary_line());
            super::summary::print_table(&result);
        }
    }

    if let Some(path) = output {
        result.save_json(&path)?;
        println!("Result written to {}", path.display());
    }

    Ok(())
}
