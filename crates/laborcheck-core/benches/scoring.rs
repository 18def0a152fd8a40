use criterion::{black_box, criterion_group, criterion_main, Criterion};

use laborcheck_core::answers::AnswerSet;
use laborcheck_core::model::AnswerValue;
use laborcheck_core::schema::Schema;
use laborcheck_core::scoring::{evaluate, EmptyCategoryPolicy};

fn mixed_answers(schema: &Schema) -> AnswerSet {
    let slots = schema
        .questions()
        .iter()
        .map(|q| q.options.get(q.index % q.options.len()).copied())
        .collect();
    AnswerSet::from_slots(slots)
}

fn bench_evaluate(c: &mut Criterion) {
    let schema = Schema::builtin().expect("built-in schema is valid");
    let mut group = c.benchmark_group("evaluate");

    group.bench_function("all_yes", |b| {
        let answers = AnswerSet::from_slots(vec![Some(AnswerValue::Yes); schema.question_count()]);
        b.iter(|| evaluate(black_box(&schema), black_box(&answers), EmptyCategoryPolicy::Compliant))
    });

    group.bench_function("mixed", |b| {
        let answers = mixed_answers(&schema);
        b.iter(|| evaluate(black_box(&schema), black_box(&answers), EmptyCategoryPolicy::Compliant))
    });

    group.bench_function("half_answered", |b| {
        let mut slots = mixed_answers(&schema).slots().to_vec();
        for slot in slots.iter_mut().skip(1).step_by(2) {
            *slot = None;
        }
        let answers = AnswerSet::from_slots(slots);
        b.iter(|| evaluate(black_box(&schema), black_box(&answers), EmptyCategoryPolicy::Compliant))
    });

    group.finish();
}

fn bench_restore(c: &mut Criterion) {
    let schema = Schema::builtin().expect("built-in schema is valid");
    let record = serde_json::to_string(&mixed_answers(&schema)).unwrap();

    c.bench_function("restore_answer_record", |b| {
        b.iter(|| AnswerSet::restore(black_box(&record), &schema))
    });
}

criterion_group!(benches, bench_evaluate, bench_restore);
criterion_main!(benches);
