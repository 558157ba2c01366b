//! quizdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdrill", version, about = "Timed quiz engine for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively with a live countdown
    Take {
        /// Path to the quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        /// Write the result JSON here on completion
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write an HTML review page here on completion
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Score a recorded answer sheet without running the clock
    Grade {
        /// Path to the quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        /// JSON answer sheet: one option index or null per question
        #[arg(long)]
        answers: PathBuf,

        /// Seconds spent on the attempt, replayed onto the clock
        #[arg(long, default_value = "0")]
        time_taken: u32,

        /// Write the result JSON here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: table, markdown, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Render a saved result JSON
    Summary {
        /// Path to the result JSON
        #[arg(long)]
        result: PathBuf,

        /// Output format: table, markdown, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { quiz, output, html } => commands::take::execute(quiz, output, html).await,
        Commands::Grade {
            quiz,
            answers,
            time_taken,
            output,
            format,
        } => commands::grade::execute(quiz, answers, time_taken, output, format),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Summary { result, format } => commands::summary::execute(result, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
