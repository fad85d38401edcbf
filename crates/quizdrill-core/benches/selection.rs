use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizdrill_core::model::{Bank, Question};
use quizdrill_core::selector::{pick_random, pick_retry};
use quizdrill_core::session::{SessionEntry, SessionRecord};

fn bench_pick_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_random");

    let bank = generate_bank(1000);

    group.bench_function("10_of_1000", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| pick_random(black_box(&bank), black_box(10), &mut rng))
    });

    group.bench_function("30_of_1000", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| pick_random(black_box(&bank), black_box(30), &mut rng))
    });

    group.bench_function("100_of_1000", |b| {
        let mut rng = StdRng::seed_from_u64(3);
        b.iter(|| pick_random(black_box(&bank), black_box(100), &mut rng))
    });

    group.finish();
}

fn bench_pick_retry(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_retry");

    let bank = generate_bank(1000);

    // A session that saw half the bank and got every other question wrong
    let record = SessionRecord {
        entries: bank
            .questions
            .iter()
            .take(500)
            .enumerate()
            .map(|(i, question)| SessionEntry {
                question: question.clone(),
                chosen: Some(if i % 2 == 0 {
                    question.correct_index
                } else {
                    (question.correct_index + 1) % 4
                }),
                correct_index: question.correct_index,
            })
            .collect(),
    };

    group.bench_function("half_seen_half_wrong", |b| {
        b.iter(|| pick_retry(black_box(&bank), black_box(&record)))
    });

    group.finish();
}

fn generate_bank(n: usize) -> Bank {
    let questions = (0..n)
        .map(|i| Question {
            id: format!("Q{i}"),
            prompt: format!("Question {i}"),
            options: ["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
            correct_index: i % 4,
            explanation: format!("Explanation {i}."),
        })
        .collect();
    Bank { questions }
}

criterion_group!(benches, bench_pick_random, bench_pick_retry);
criterion_main!(benches);
