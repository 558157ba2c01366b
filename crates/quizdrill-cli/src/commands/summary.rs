//! The `quizdrill summary` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::report::QuizResult;

pub fn execute(result_path: PathBuf, format: String) -> Result<()> {
    let result = QuizResult::load_json(&result_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", quizdrill_report::text::to_markdown(&result));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            // text format
            println!(
                "Quiz {} — submitted {} ({})",
                result.quiz_id,
                result.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
                result.reason
            );
            print_table(&result);
        }
    }

    Ok(())
}

pub(crate) fn print_table(result: &QuizResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Score", "Correct", "Wrong", "Unanswered", "Time"]);
    table.add_row(vec![
        Cell::new(format!("{}%", result.score)),
        Cell::new(result.correct_answers),
        Cell::new(result.wrong_answers),
        Cell::new(result.unanswered),
        Cell::new(format!("{}s", result.time_taken_seconds)),
    ]);

    println!("{table}");
}
