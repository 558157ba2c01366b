//! The `quizdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizdrill validate --quiz quizzes/example.toml");
    println!("  2. Run: quizdrill take --quiz quizzes/example.toml");

    Ok(())
}

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "rust-basics"
title = "Rust Basics Checkpoint"
subject = "Rust"
duration_minutes = 5

[[questions]]
id = "ownership-move"
prompt = "After `let b = a;` where `a` is a `String`, what happens to `a`?"
options = [
    "It is copied; both stay usable",
    "It is moved and can no longer be used",
    "It is borrowed until `b` goes out of scope",
    "It is dropped immediately",
]
correct_option = 1
explanation = "`String` is not `Copy`; assignment moves ownership to `b`."
topic = "ownership"

[[questions]]
id = "mutable-borrows"
prompt = "How many mutable borrows of a value may exist at once?"
options = [
    "Exactly one",
    "One per thread",
    "Unlimited, if they are in the same scope",
]
correct_option = 0
explanation = "The borrow checker allows a single exclusive borrow at a time."
topic = "borrowing"

[[questions]]
id = "option-unwrap"
prompt = "What does `Option::unwrap` do when called on `None`?"
options = [
    "Returns a default value",
    "Returns a null pointer",
    "Panics",
    "Blocks until a value arrives",
]
correct_option = 2
explanation = "`unwrap` panics on `None`; prefer pattern matching or `?`."
topic = "error-handling"

[[questions]]
id = "vec-growth"
prompt = "What happens when a `Vec` exceeds its capacity?"
options = [
    "Pushing returns an error",
    "It reallocates and moves its elements",
    "It silently drops the oldest element",
    "It panics",
]
correct_option = 1
explanation = "`Vec` grows by reallocating; existing elements move to the new buffer."
topic = "collections"
"#;
