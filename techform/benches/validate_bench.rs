//! Benchmarks for form validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use techform::schema::validate;
use techform::testing::InputBuilder;

fn validate_benchmark(c: &mut Criterion) {
    let valid = InputBuilder::new().tech("Rust", 9).tech("Elixir", 3).build();
    let invalid = InputBuilder::empty().tech("", 42).tech("Go", "x").build();

    c.bench_function("validate_valid", |b| b.iter(|| validate(black_box(&valid))));
    c.bench_function("validate_invalid", |b| b.iter(|| validate(black_box(&invalid))));
}

criterion_group!(benches, validate_benchmark);
criterion_main!(benches);
