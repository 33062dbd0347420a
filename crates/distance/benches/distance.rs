//! Benchmarks for the distance kernel and drivers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fastlev_distance::{distance, distance_async, distance_exact, AsyncOptions, DistanceOptions};

/// Leading words of a Scrabble dictionary, repeated ten times.
fn word_list() -> Vec<&'static str> {
    const WORDS: &[&str] = &[
        "aa", "aah", "aahed", "aahing", "aahs", "aal", "aalii", "aaliis", "aals", "aardvark",
        "aardvarks", "aardwolf", "aardwolves", "aargh", "aarrgh", "aarrghh", "aarti", "aartis",
        "aas", "aasvogel", "aasvogels", "ab", "aba", "abac", "abaca", "abacas", "abaci", "aback",
        "abacs", "abacterial", "abactinal", "abactinally", "abactor", "abactors", "abacus",
        "abacuses", "abaft", "abaka", "abakas", "abalone", "abalones", "abamp", "abampere",
        "abamperes", "abamps", "aband", "abanded", "abanding", "abandon", "abandoned",
    ];
    WORDS.iter().copied().cycle().take(WORDS.len() * 10).collect()
}

fn text(len: usize) -> String {
    "lorem ipsum dolor sit amet consectetur adipiscing elit "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn bench_consecutive_words(c: &mut Criterion) {
    let words = word_list();

    c.bench_function("consecutive_words", |b| {
        b.iter(|| {
            let mut previous = "";
            for &word in &words {
                black_box(distance_exact(black_box(previous), black_box(word)));
                previous = word;
            }
        })
    });
}

fn bench_policies(c: &mut Criterion) {
    let a = text(512);
    let b: String = text(530).chars().rev().collect();
    let collated = DistanceOptions::new().with_collator(true);

    let mut group = c.benchmark_group("policies");
    group.bench_function("exact", |bench| {
        bench.iter(|| distance_exact(black_box(&a), black_box(&b)))
    });
    group.bench_function("collator", |bench| {
        bench.iter(|| distance(black_box(&a), black_box(&b), &collated))
    });
    group.finish();
}

fn bench_sync_vs_async(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let mut group = c.benchmark_group("drivers");

    for size in [64, 256, 1024].iter() {
        let a = text(*size);
        let b = text(*size + 17);

        group.bench_with_input(BenchmarkId::new("sync", size), size, |bench, _| {
            bench.iter(|| distance_exact(black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("async", size), size, |bench, _| {
            bench.iter(|| runtime.block_on(distance_async(&a, &b, AsyncOptions::new())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_consecutive_words, bench_policies, bench_sync_vs_async);
criterion_main!(benches);
