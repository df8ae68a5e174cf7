use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use simcheck::{EngineOptions, SimilarityEngine};
use std::hint::black_box;

const ORIGINAL: &str = "今天是星期天，天气晴，今天晚上我要去看电影。我们一起去吃饭吧，然后去公园散步，最后回家休息。";
const CANDIDATE: &str = "今天是周天，天气晴朗，我晚上要去看电影。我们一起吃饭，然后去公园散散步，最后回家。";

fn documents(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("{ORIGINAL}第{i}段。"), format!("{CANDIDATE}第{i}段。")))
        .collect()
}

fn pair_benchmark(c: &mut Criterion) {
    let cached = SimilarityEngine::new(EngineOptions::default()).expect("engine");
    let uncached = SimilarityEngine::new(EngineOptions {
        cache_enabled: false,
        ..EngineOptions::default()
    })
    .expect("engine");

    c.bench_function("score_pair_cached", |b| {
        b.iter(|| cached.score(black_box(ORIGINAL), black_box(CANDIDATE)).expect("score"))
    });
    c.bench_function("score_pair_uncached", |b| {
        b.iter(|| uncached.score(black_box(ORIGINAL), black_box(CANDIDATE)).expect("score"))
    });
}

fn batch_benchmark(c: &mut Criterion) {
    let engine = SimilarityEngine::new(EngineOptions::default()).expect("engine");
    let mut group = c.benchmark_group("score_batch");
    for n in [10usize, 100] {
        let pairs = documents(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
            b.iter(|| engine.score_batch(black_box(pairs)).expect("batch"))
        });
    }
    group.finish();
}

criterion_group!(benches, pair_benchmark, batch_benchmark);
criterion_main!(benches);
