//! HTML review page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined: the score
//! summary on top, then every question with the selected and correct
//! options and the explanation. This is the review-mode view of an attempt.

use std::path::Path;

use anyhow::{Context, Result};

use quizdrill_core::model::AttemptConfig;
use quizdrill_core::report::QuizResult;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate a review page for a finished attempt.
///
/// `config` must be the quiz the result was produced from; question rows
/// are matched by position.
pub fn generate_html(config: &AttemptConfig, result: &QuizResult) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizdrill review — {}</title>\n",
        html_escape(&config.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&config.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} question(s) | submitted {} ({})</p>\n",
        html_escape(&config.subject),
        result.total_questions,
        result.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.reason,
    ));
    html.push_str("</header>\n");

    // Score summary
    html.push_str("<section class=\"summary\">\n");
    html.push_str(&format!("<p class=\"score\">{}%</p>\n", result.score));
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Correct</th><th>Wrong</th><th>Unanswered</th><th>Time</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}s</td></tr></tbody>\n",
        result.correct_answers, result.wrong_answers, result.unanswered, result.time_taken_seconds
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Per-question review
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Review</h2>\n");

    for (position, record) in result.answers.iter().enumerate() {
        let Some(question) = config.questions.get(position) else {
            continue;
        };

        let class = if record.is_correct {
            "correct"
        } else if record.selected_option.is_none() {
            "unanswered"
        } else {
            "wrong"
        };

        let selected = record
            .selected_option
            .and_then(|i| question.options.get(i))
            .map(|option| html_escape(option))
            .unwrap_or_else(|| "—".to_string());
        let correct = question
            .options
            .get(record.correct_option)
            .map(|option| html_escape(option))
            .unwrap_or_default();

        html.push_str(&format!("<article class=\"question {class}\">\n"));
        html.push_str(&format!(
            "<h3>{}. {}</h3>\n",
            position + 1,
            html_escape(&question.prompt)
        ));
        html.push_str(&format!(
            "<p>Your answer: <strong>{selected}</strong><br>Correct answer: <strong>{correct}</strong></p>\n"
        ));
        if !question.explanation.is_empty() {
            html.push_str(&format!(
                "<p class=\"explanation\">{}</p>\n",
                html_escape(&question.explanation)
            ));
        }
        html.push_str("</article>\n");
    }

    html.push_str("</section>\n");
    html.push_str("</body>\n</html>\n");

    html
}

/// Generate the review page and write it to `path`.
pub fn write_html_report(config: &AttemptConfig, result: &QuizResult, path: &Path) -> Result<()> {
    let html = generate_html(config, result);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write review page to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
header .meta { color: #666; }
.summary .score { font-size: 3rem; font-weight: 700; margin: 0.5rem 0; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
.question { border-left: 4px solid #ccc; padding: 0.2rem 1rem; margin: 1rem 0; }
.question.correct { border-left-color: #2e7d32; }
.question.wrong { border-left-color: #c62828; }
.question.unanswered { border-left-color: #f9a825; }
.explanation { color: #555; font-style: italic; }
"#;
