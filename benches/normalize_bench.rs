//! Frame Normalization Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the functions that run on every inbound frame. The feed
//! processes messages strictly in order, so per-frame cost bounds how
//! fresh the panel can be under a chatty upstream.
//!
//! Run with: cargo bench --bench normalize_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fx_ticker_demo::domain::format::{format_price, format_timestamp_in};
use fx_ticker_demo::domain::normalize::normalize_frame;
use fx_ticker_demo::domain::snapshot::{FeedSnapshot, TimestampValue};

/// Benchmark the bare-object frame shape.
fn bench_normalize_object(c: &mut Criterion) {
    let frame = r#"{"price": 1.0850, "dt": 1700000000000}"#;

    c.bench_function("normalize_object_frame", |b| {
        b.iter(|| normalize_frame(black_box(frame)));
    });
}

/// Benchmark the enveloped frame shape with string-typed fields.
fn bench_normalize_envelope(c: &mut Criterion) {
    let frame = r#"{"data":[{"Price": "1.0850", "DT": 1700000000000}]}"#;

    c.bench_function("normalize_envelope_frame", |b| {
        b.iter(|| normalize_frame(black_box(frame)));
    });
}

/// Benchmark the rejection path for junk frames.
fn bench_normalize_junk(c: &mut Criterion) {
    let frame = "definitely not json";

    c.bench_function("normalize_junk_frame", |b| {
        b.iter(|| normalize_frame(black_box(frame)));
    });
}

/// Benchmark applying a normalized delta to a snapshot.
fn bench_snapshot_apply(c: &mut Criterion) {
    let snapshot = FeedSnapshot::new("EURUSD:CUR").connected();
    let update = normalize_frame(r#"{"price": 1.0850, "dt": 1700000000000}"#)
        .expect("valid frame");

    c.bench_function("snapshot_apply", |b| {
        b.iter(|| black_box(&snapshot).apply(black_box(&update)));
    });
}

/// Benchmark the display formatters.
fn bench_formatters(c: &mut Criterion) {
    let ts = TimestampValue::Epoch(1_700_000_000_000.0);

    c.bench_function("format_price", |b| {
        b.iter(|| format_price(black_box(Some(1.085_012_3))));
    });

    c.bench_function("format_timestamp_utc", |b| {
        b.iter(|| format_timestamp_in(black_box(&ts), &chrono::Utc));
    });
}

criterion_group!(
    benches,
    bench_normalize_object,
    bench_normalize_envelope,
    bench_normalize_junk,
    bench_snapshot_apply,
    bench_formatters
);
criterion_main!(benches);
