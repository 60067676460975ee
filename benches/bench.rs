//! Criterion benchmarks for the hamspam classifier.
//!
//! Covers text analysis, vectorizer fitting, solver fitting and
//! single-message prediction on a synthetic corpus.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hamspam::analysis::{Analyzer, EnglishAnalyzer};
use hamspam::ml::{LogisticRegression, TfIdfVectorizer};
use hamspam::trainer::{TrainedModel, Trainer};
use hamspam::types::{Label, LabeledMessage};

const SPAM_WORDS: [&str; 12] = [
    "win", "free", "prize", "claim", "cash", "iphone", "offer", "urgent", "reward", "click",
    "winner", "bonus",
];
const HAM_WORDS: [&str; 12] = [
    "meeting", "tomorrow", "lunch", "report", "project", "dinner", "invoice", "call", "team",
    "weekend", "review", "schedule",
];

/// Generate labeled messages for benchmarking.
fn generate_messages(count: usize) -> Vec<LabeledMessage> {
    (0..count)
        .map(|i| {
            let (words, label) = if i % 3 == 0 {
                (&SPAM_WORDS, Label::Spam)
            } else {
                (&HAM_WORDS, Label::Ham)
            };
            let length = 5 + (i % 15);
            let text: Vec<&str> = (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect();
            LabeledMessage::new(text.join(" "), label)
        })
        .collect()
}

fn trained_model(messages: &[LabeledMessage]) -> TrainedModel {
    Trainer::default().train_on(messages.to_vec()).unwrap()
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = EnglishAnalyzer::new().unwrap();
    let messages = generate_messages(1000);

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_messages", |b| {
        b.iter(|| {
            for message in messages.iter().take(100) {
                let tokens: Vec<_> = analyzer.analyze(black_box(&message.text)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark vectorizer and solver fitting.
fn bench_fitting(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitting");
    group.sample_size(20);

    let messages = generate_messages(2000);
    let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
    let labels: Vec<Label> = messages.iter().map(|m| m.label).collect();

    group.bench_function("tfidf_fit_transform", |b| {
        b.iter(|| {
            let mut vectorizer = TfIdfVectorizer::new(Arc::new(EnglishAnalyzer::new().unwrap()));
            black_box(vectorizer.fit_transform(black_box(&texts)).unwrap())
        })
    });

    let mut vectorizer = TfIdfVectorizer::new(Arc::new(EnglishAnalyzer::new().unwrap()));
    let features = vectorizer.fit_transform(&texts).unwrap();
    group.bench_function("logistic_regression_fit", |b| {
        b.iter(|| {
            let mut model = LogisticRegression::default();
            model
                .fit(black_box(&features), &labels, vectorizer.vocabulary_size())
                .unwrap();
            black_box(model)
        })
    });

    group.finish();
}

/// Benchmark single-message prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let messages = generate_messages(2000);
    let model = trained_model(&messages);

    group.bench_function("predict_single_message", |b| {
        b.iter(|| black_box(model.predict(black_box("WIN A FREE IPHONE NOW!!!")).unwrap()))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("predict_batch_messages", |b| {
        b.iter(|| {
            for message in messages.iter().take(100) {
                black_box(model.predict(&message.text).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_fitting, bench_prediction);

criterion_main!(benches);
