//! Markdown rendering of a finished attempt.

use quizdrill_core::report::QuizResult;

/// Format a result as markdown: summary line plus a per-question table.
pub fn to_markdown(result: &QuizResult) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "**Score: {}%** ({} correct, {} wrong, {} unanswered of {}; {}s, {})\n\n",
        result.score,
        result.correct_answers,
        result.wrong_answers,
        result.unanswered,
        result.total_questions,
        result.time_taken_seconds,
        result.reason,
    ));

    if !result.answers.is_empty() {
        md.push_str("| # | Question | Selected | Correct | Result |\n");
        md.push_str("|---|----------|----------|---------|--------|\n");
        for (position, record) in result.answers.iter().enumerate() {
            let selected = record
                .selected_option
                .map(|i| i.to_string())
                .unwrap_or_else(|| "—".to_string());
            let verdict = if record.is_correct {
                "correct"
            } else if record.selected_option.is_none() {
                "unanswered"
            } else {
                "wrong"
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                position + 1,
                record.question_id,
                selected,
                record.correct_option,
                verdict
            ));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quizdrill_core::model::SubmitReason;
    use quizdrill_core::report::AnswerRecord;
    use uuid::Uuid;

    fn fixture() -> QuizResult {
        QuizResult {
            attempt_id: Uuid::nil(),
            quiz_id: "quiz-1".into(),
            score: 67,
            total_questions: 3,
            correct_answers: 2,
            wrong_answers: 1,
            unanswered: 0,
            time_taken_seconds: 45,
            reason: SubmitReason::Timeout,
            submitted_at: Utc::now(),
            answers: vec![
                AnswerRecord {
                    question_id: "q1".into(),
                    selected_option: Some(1),
                    correct_option: 1,
                    is_correct: true,
                },
                AnswerRecord {
                    question_id: "q2".into(),
                    selected_option: Some(0),
                    correct_option: 2,
                    is_correct: false,
                },
                AnswerRecord {
                    question_id: "q3".into(),
                    selected_option: Some(3),
                    correct_option: 3,
                    is_correct: true,
                },
            ],
        }
    }

    #[test]
    fn markdown_has_summary_and_rows() {
        let md = to_markdown(&fixture());
        assert!(md.contains("**Score: 67%**"));
        assert!(md.contains("| 2 | q2 | 0 | 2 | wrong |"));
        assert!(md.contains("timeout"));
    }

    #[test]
    fn markdown_for_empty_result_has_no_table() {
        let mut result = fixture();
        result.answers.clear();
        result.total_questions = 0;
        let md = to_markdown(&result);
        assert!(!md.contains("| # |"));
    }
}
