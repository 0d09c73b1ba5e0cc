//! Benchmarks for feature extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ladder_feed::synthetic::{SyntheticConfig, SyntheticGenerator};
use ladder_lob::{BookState, FeatureWindow};

fn create_test_book() -> BookState {
    let log = SyntheticGenerator::new(SyntheticConfig::default())
        .generate_log(1_000)
        .expect("synthetic log is well formed");

    let mut book = BookState::new();
    while book.has_next(&log) {
        book.advance(&log).expect("replay");
    }
    book
}

fn bench_feature_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("features");

    let book = create_test_book();

    group.bench_function("extract_features", |b| {
        b.iter(|| black_box(&book).extract_features());
    });

    group.bench_function("to_array", |b| {
        let features = book.extract_features();
        b.iter(|| black_box(&features).to_array());
    });

    group.finish();
}

fn bench_feature_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_window");

    let book = create_test_book();

    group.bench_function("push_book", |b| {
        let mut window = FeatureWindow::new(100);
        b.iter(|| window.push_book(black_box(&book)));
    });

    group.bench_function("to_matrix_100", |b| {
        let mut window = FeatureWindow::new(100);
        for _ in 0..100 {
            window.push_book(&book);
        }
        b.iter(|| black_box(&window).to_matrix(100));
    });

    group.finish();
}

criterion_group!(benches, bench_feature_extraction, bench_feature_window);
criterion_main!(benches);
