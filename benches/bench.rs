//! Criterion benchmarks for lexindex.
//!
//! Covers tokenization/normalization, store upserts under contention and
//! full index builds at several worker counts.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lexindex::analysis::{SpaceTokenizer, Tokenizer, normalize};
use lexindex::document::{DocumentId, MemoryDocumentSource};
use lexindex::index::IndexStore;
use lexindex::parallel_index::{IndexerConfig, ParallelIndexEngine};

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "Engine", "full", "TEXT", "index", "query", "document", "field", "term",
        "phrase", "boolean", "vector", "similarity", "relevance", "score", "analysis",
        "tokenization", "Stemming", "normalization", "clustering", "machine", "learning",
        "algorithm", "data", "structure", "performance", "optimization", "memory", "storage",
        "retrieval", "ranking", "filtering",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let mut lines = Vec::new();
        for chunk in 0..(doc_length / 10) {
            let line: Vec<&str> = (0..10)
                .map(|j| words[(i * 7 + (chunk * 10 + j) * 13) % words.len()])
                .collect();
            lines.push(line.join(" "));
        }
        lines.push(format!("doc{i}"));
        documents.push(lines.join("\n"));
    }

    documents
}

fn create_source(count: usize) -> MemoryDocumentSource {
    let mut source = MemoryDocumentSource::new("Input");
    for (i, text) in generate_test_documents(count).into_iter().enumerate() {
        source.add_document(&format!("doc{i:05}.txt"), text);
    }
    source
}

/// Benchmark tokenization and normalization of a single document.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");
    let tokenizer = SpaceTokenizer::new();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("tokenize_and_normalize", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for text in &texts {
                for line in text.lines() {
                    for token in tokenizer.tokenize(black_box(line)) {
                        count += normalize(token).len();
                    }
                }
            }
            black_box(count)
        })
    });

    group.finish();
}

/// Benchmark concurrent upserts into a single store.
fn bench_store_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_upsert");

    for shards in [1usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &shards, |b, &shards| {
            b.iter(|| {
                let store = Arc::new(IndexStore::with_shards(shards));
                std::thread::scope(|s| {
                    for t in 0..4 {
                        let store = Arc::clone(&store);
                        s.spawn(move || {
                            for d in 0..250 {
                                let doc = DocumentId::new(format!("{t}-{d}"));
                                for w in 0..20 {
                                    store.upsert(format!("word{w}"), &doc);
                                }
                            }
                        });
                    }
                });
                black_box(store.len())
            })
        });
    }

    group.finish();
}

/// Benchmark full builds with an increasing number of workers.
fn bench_parallel_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_build");
    group.sample_size(20);

    let source = Arc::new(create_source(1000));
    let engine = ParallelIndexEngine::new(IndexerConfig::default(), source).unwrap();
    let max_workers = engine.config().max_workers();

    group.throughput(Throughput::Elements(1000));
    for workers in [1usize, 2, 4, 8].into_iter().filter(|w| *w <= max_workers) {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| black_box(engine.build(workers).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_analysis,
    bench_store_upsert,
    bench_parallel_build
);
criterion_main!(benches);
