use std::fmt::Write as _;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizdrill_core::parser::parse_quiz_str;

fn make_toml(n: usize) -> String {
    let mut toml = String::from(
        "[quiz]\nid = \"bench\"\ntitle = \"Bench\"\nsubject = \"Bench\"\nduration_minutes = 30\n",
    );
    for i in 0..n {
        let _ = write!(
            toml,
            "\n[[questions]]\nid = \"q{i}\"\nprompt = \"prompt {i}\"\n\
             options = [\"a\", \"b\", \"c\", \"d\"]\ncorrect_option = {}\n\
             explanation = \"explanation {i}\"\ntopic = \"bench\"\n",
            i % 4
        );
    }
    toml
}

fn bench_parse_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");
    let source = PathBuf::from("bench.toml");

    for n in [10usize, 100] {
        let toml = make_toml(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| parse_quiz_str(black_box(&toml), &source).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_quiz);
criterion_main!(benches);
