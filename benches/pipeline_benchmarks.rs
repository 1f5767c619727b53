use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::TempDir;

use wordtally::analysis::{analyze_content, analyze_sequential, default_analyzers};
use wordtally::parallel::{CancellationToken, ExecutionMode};
use wordtally::pipeline::{Pipeline, PipelineConfig, analyze_parallel};

const VOCABULARY: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo", "sierra", "tango",
];

fn random_text(rng: &mut StdRng, words: usize) -> String {
    let mut text = String::with_capacity(words * 8);
    for i in 0..words {
        text.push_str(VOCABULARY[rng.gen_range(0..VOCABULARY.len())]);
        text.push(if i % 12 == 11 { '\n' } else { ' ' });
    }
    text
}

/// Synthetic corpus of `files` documents with `words` words each
fn corpus(files: usize, words: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let paths = (0..files)
        .map(|i| {
            let path = dir.path().join(format!("doc-{i:04}.txt"));
            fs::write(&path, random_text(&mut rng, words)).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

fn bench_engine(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let analyzers = default_analyzers();
    let mut group = c.benchmark_group("engine");

    for words in [1_000, 50_000] {
        let content = random_text(&mut rng, words);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze_content", words), &content, |b, content| {
            b.iter(|| analyze_content(black_box(content), &analyzers))
        });
    }
    group.finish();
}

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let (_dir, files) = corpus(200, 2_000);
    let analyzers = default_analyzers();
    let mut group = c.benchmark_group("files");
    group.sample_size(20);
    group.throughput(Throughput::Elements(files.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| analyze_sequential(black_box(&files), &analyzers))
    });

    for workers in [2, 4, num_cpus::get()] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &workers| {
            b.iter(|| analyze_parallel(black_box(&files), analyzers.clone(), workers).unwrap())
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let (_dir, files) = corpus(200, 2_000);
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let pipeline = Pipeline::new(PipelineConfig {
            mode,
            ..PipelineConfig::default()
        });
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                pipeline
                    .run(files.clone(), &CancellationToken::new(), 10, |_| {})
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_engine,
    bench_sequential_vs_parallel,
    bench_full_pipeline
);
criterion_main!(benches);
