//! TF-IDF fit and embedding benchmark
//!
//! Fitting is one pass over the corpus to build the vocabulary and document
//! frequencies; embedding a text is one pass over its terms. Cosine distance
//! between sparse embeddings only touches non-zero entries.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench tfidf_embedding
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use semdrift::analysis::ORIGINAL_CLEAN;
use semdrift::noise::inject_noise;
use semdrift::vectorizer::{TfIdfModel, VectorizerConfig};

/// Noisy variants of the reference sentence
fn corpus(documents: usize) -> Vec<String> {
    (0..documents)
        .map(|i| inject_noise(ORIGINAL_CLEAN, 0.05 + (i % 10) as f64 * 0.05, i as u64).unwrap())
        .collect()
}

/// Benchmark: fitting with varying corpus sizes
fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf_fit");

    for documents in [10, 100, 1_000] {
        let docs = corpus(documents);
        group.bench_with_input(BenchmarkId::from_parameter(documents), &docs, |b, docs| {
            b.iter(|| TfIdfModel::fit(black_box(docs), &VectorizerConfig::default()));
        });
    }

    group.finish();
}

/// Benchmark: embedding with unigrams vs 1-3 grams
fn bench_embed(c: &mut Criterion) {
    let docs = corpus(100);
    let mut group = c.benchmark_group("tfidf_embed");

    for max_n in [1, 3] {
        let config = VectorizerConfig {
            ngram_range: (1, max_n),
            ..VectorizerConfig::default()
        };
        let model = TfIdfModel::fit(&docs, &config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(max_n), &model, |b, model| {
            b.iter(|| model.embed(black_box(ORIGINAL_CLEAN)));
        });
    }

    group.finish();
}

/// Benchmark: sparse cosine distance
fn bench_cosine_distance(c: &mut Criterion) {
    let docs = corpus(100);
    let model = TfIdfModel::fit(&docs, &VectorizerConfig::default()).unwrap();
    let original = model.embed(ORIGINAL_CLEAN);
    let noisy = model.embed(&docs[50]);

    c.bench_function("embedding_cosine_distance", |b| {
        b.iter(|| black_box(&original).cosine_distance(black_box(&noisy)));
    });
}

criterion_group!(benches, bench_fit, bench_embed, bench_cosine_distance);
criterion_main!(benches);
