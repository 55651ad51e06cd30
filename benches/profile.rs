//! Benchmarks for the profiling pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strprof::{infer_regex, profile, ProfileOptions};

fn account_codes(n: usize) -> Vec<String> {
    let prefixes = ["ACC", "ORG", "ACCT", "ACME"];
    (0..n)
        .map(|i| format!("{}-{:05}", prefixes[i % prefixes.len()], i))
        .collect()
}

fn bench_profile(c: &mut Criterion) {
    let small = account_codes(100);
    let large = account_codes(5_000);

    c.bench_function("profile_100_codes", |b| {
        b.iter(|| profile(black_box(&small), ProfileOptions::default()))
    });

    c.bench_function("profile_5000_codes", |b| {
        b.iter(|| profile(black_box(&large), ProfileOptions::default()))
    });

    let quarters: Vec<String> = (2000..2030)
        .flat_map(|y| (1..=4).map(move |q| format!("{y}-Q{q}")))
        .collect();
    c.bench_function("infer_regex_quarters", |b| {
        b.iter(|| infer_regex(black_box(&quarters), &ProfileOptions::default()))
    });
}

criterion_group!(benches, bench_profile);
criterion_main!(benches);
