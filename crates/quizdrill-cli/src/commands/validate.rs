//! The `quizdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![parser::parse_quiz(&quiz_path)?]
    };

    let mut total_warnings = 0;

    for config in &quizzes {
        println!(
            "Quiz: {} ({} question(s), {} minute(s))",
            config.title,
            config.questions.len(),
            config.duration_minutes
        );

        let warnings = parser::validate_quiz(config);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
