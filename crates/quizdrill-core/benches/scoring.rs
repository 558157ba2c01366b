use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use quizdrill_core::attempt::Attempt;
use quizdrill_core::model::{AttemptConfig, Question, SubmitReason};
use quizdrill_core::scoring::percentage_score;

fn make_config(n: usize) -> AttemptConfig {
    AttemptConfig {
        quiz_id: "bench".into(),
        title: "Bench".into(),
        subject: String::new(),
        duration_minutes: 10,
        questions: (0..n)
            .map(|i| Question {
                id: format!("q{i}"),
                prompt: format!("prompt {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_option: i % 4,
                explanation: String::new(),
                topic: String::new(),
            })
            .collect(),
    }
}

fn make_attempt(n: usize) -> Attempt {
    let mut attempt = Attempt::new(make_config(n)).unwrap();
    for i in 0..n {
        attempt.go_to(i).unwrap();
        // Half the sheet correct, half wrong.
        attempt.select_answer(if i % 2 == 0 { i % 4 } else { (i + 1) % 4 }).unwrap();
    }
    attempt
}

fn bench_percentage_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentage_score");

    group.bench_function("5/7", |b| {
        b.iter(|| percentage_score(black_box(5), black_box(7)))
    });

    group.bench_function("499/1000", |b| {
        b.iter(|| percentage_score(black_box(499), black_box(1000)))
    });

    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");

    for n in [10usize, 100, 1000] {
        group.bench_function(format!("n={n}"), |b| {
            b.iter_batched(
                || make_attempt(n),
                |mut attempt| black_box(attempt.submit(SubmitReason::UserInitiated).score),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_percentage_score, bench_submit);
criterion_main!(benches);
