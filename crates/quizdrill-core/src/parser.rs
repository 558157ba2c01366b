//! Quiz TOML parser.
//!
//! Loads quizzes from TOML files and directories, and validates them.
//! Structural invariants (an option list that is empty or does not contain
//! the marked correct option) fail the parse; style issues come back as
//! warnings from [`validate_quiz`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AttemptConfig, Question};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
    #[serde(default)]
    subject: String,
    duration_minutes: u32,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    topic: String,
}

/// Parse a single TOML file into an [`AttemptConfig`].
pub fn parse_quiz(path: &Path) -> Result<AttemptConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into an [`AttemptConfig`] (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<AttemptConfig> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            prompt: q.prompt,
            options: q.options,
            correct_option: q.correct_option,
            explanation: q.explanation,
            topic: q.topic,
        })
        .collect();

    let config = AttemptConfig {
        quiz_id: parsed.quiz.id,
        title: parsed.quiz.title,
        subject: parsed.quiz.subject,
        duration_minutes: parsed.quiz.duration_minutes,
        questions,
    };

    config
        .validate()
        .with_context(|| format!("invalid quiz: {}", source_path.display()))?;

    Ok(config)
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<AttemptConfig>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(config) => quizzes.push(config),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz for common authoring issues.
pub fn validate_quiz(config: &AttemptConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if config.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    if config.duration_minutes == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "duration is zero; the attempt will expire immediately".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &config.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check for empty prompts
    for question in &config.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    // A single option makes the question unmissable
    for question in &config.questions {
        if question.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "fewer than two options".into(),
            });
        }
    }

    warnings
}
