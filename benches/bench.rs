//! Criterion benchmarks for nbclassify.
//!
//! - Text analysis
//! - TF-IDF vectorization
//! - Naive Bayes scoring

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use nbclassify::analysis::analyzer::Analyzer;
use nbclassify::analysis::analyzer::standard::StandardAnalyzer;
use nbclassify::classification::{DocumentClassifier, NaiveBayesClassifier};
use nbclassify::config::ClassifierConfig;
use nbclassify::model::{
    Dictionary, DocumentFrequency, LabelIndex, ModelArtifacts, WeightModelBuilder,
};

const VOCABULARY: usize = 2_000;
const LABELS: usize = 20;

fn term(i: usize) -> String {
    format!("term{i}")
}

/// Generate test documents over the synthetic vocabulary plus some unknown words.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let words: Vec<String> = (0..doc_length)
            .map(|j| {
                let idx = (i * 7 + j * 13) % (VOCABULARY + 200); // Pseudo-random distribution
                if idx < VOCABULARY { term(idx) } else { format!("unknown{idx}") }
            })
            .collect();
        documents.push(words.join(" "));
    }
    documents
}

fn build_classifier() -> NaiveBayesClassifier {
    let dictionary = Dictionary::from_entries((0..VOCABULARY).map(|i| (term(i), i as u32))).unwrap();
    let df = DocumentFrequency::from_entries(
        10_000,
        (0..VOCABULARY as u32).map(|t| (t, 1 + (t as u64 * 31) % 5_000)),
    )
    .unwrap();
    let labels = LabelIndex::from_names((0..LABELS).map(|l| format!("label{l}"))).unwrap();

    let mut builder = WeightModelBuilder::new(LABELS, VOCABULARY);
    for t in 0..VOCABULARY {
        for l in 0..LABELS {
            if (t + l) % 3 == 0 {
                builder
                    .add_weight(t as u32, l as u32, ((t * 17 + l * 5) % 23) as f64)
                    .unwrap();
            }
        }
    }

    let artifacts = ModelArtifacts::new(dictionary, df, labels, builder.build().unwrap()).unwrap();
    NaiveBayesClassifier::from_config(Arc::new(artifacts), &ClassifierConfig::default()).unwrap()
}

fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let count = analyzer.analyze(black_box(text)).unwrap().count();
                black_box(count);
            }
        })
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let classifier = build_classifier();
    let texts = generate_test_documents(100);
    let tokens: Vec<_> = texts.iter().map(|t| classifier.tokenize(t).unwrap()).collect();
    let vectors: Vec<_> = tokens.iter().map(|t| classifier.vectorize(t)).collect();

    group.throughput(Throughput::Elements(100));
    group.bench_function("vectorize", |b| {
        b.iter(|| {
            for doc in &tokens {
                black_box(classifier.vectorize(black_box(doc)));
            }
        })
    });

    group.bench_function("score", |b| {
        b.iter(|| {
            for vector in &vectors {
                black_box(classifier.score(black_box(vector)).unwrap());
            }
        })
    });

    group.bench_function("classify_end_to_end", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(classifier.classify(black_box(text)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_classification);
criterion_main!(benches);
