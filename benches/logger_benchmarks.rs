//! Criterion benchmarks for flarelog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flarelog::prelude::*;
use std::io;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn sample_record() -> Record {
    Record::new(Level::ERROR, "request failed")
        .with_attr(Attr::new("code", 500))
        .with_attr(Attr::group(
            "req",
            vec![Attr::new("method", "GET"), Attr::new("path", "/users/42")],
        ))
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_json_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_encode");
    group.throughput(Throughput::Elements(1));

    let handler = JsonHandler::new(io::sink(), HandlerOptions::default());
    let record = sample_record();

    group.bench_function("flat", |b| {
        b.iter(|| black_box(handler.encode(black_box(&record))));
    });

    let scoped = handler
        .with_attrs(&[Attr::new("service", "api")])
        .with_group("outer");
    group.bench_function("grouped", |b| {
        b.iter(|| black_box(scoped.encode(black_box(&record))));
    });

    group.finish();
}

// ============================================================================
// Handler Benchmarks
// ============================================================================

fn bench_flare_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("flare_handle");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().unwrap();
    let record = sample_record();

    let colored = FlareHandler::builder()
        .file_path(temp_dir.path().join("colored.log"))
        .console(io::sink())
        .build()
        .unwrap();
    group.bench_function("colored", |b| {
        b.iter(|| colored.handle(black_box(&record)).unwrap());
    });

    let plain = FlareHandler::builder()
        .file_path(temp_dir.path().join("plain.log"))
        .console(io::sink())
        .use_colors(false)
        .build()
        .unwrap();
    group.bench_function("plain", |b| {
        b.iter(|| plain.handle(black_box(&record)).unwrap());
    });

    let hooked = FlareHandler::builder()
        .file_path(temp_dir.path().join("hooked.log"))
        .console(io::sink())
        .replace_attr(|_, attr| {
            if attr.key == "path" {
                Rewrite::Suppress
            } else {
                Rewrite::Keep(attr)
            }
        })
        .build()
        .unwrap();
    group.bench_function("with_hook", |b| {
        b.iter(|| hooked.handle(black_box(&record)).unwrap());
    });

    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().unwrap();
    let handler = FlareHandler::builder()
        .level(Level::ERROR)
        .file_path(temp_dir.path().join("filtered.log"))
        .console(io::sink())
        .build()
        .unwrap();
    let logger = Logger::new(handler);

    group.bench_function("below_threshold", |b| {
        b.iter(|| logger.debug(black_box("Filtered message"), vec![]));
    });

    group.finish();
}

// ============================================================================
// Concurrent Benchmarks
// ============================================================================

fn bench_concurrent_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_handle");

    let temp_dir = TempDir::new().unwrap();
    let handler = FlareHandler::builder()
        .file_path(temp_dir.path().join("concurrent.log"))
        .console(io::sink())
        .build()
        .unwrap();
    let root: Arc<dyn Handler> = Arc::new(handler);

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let workers: Vec<_> = (0..threads)
                    .map(|t| {
                        let derived = root.with_attrs(&[Attr::new("thread", t)]);
                        thread::spawn(move || {
                            let record = sample_record();
                            for _ in 0..100 {
                                derived.handle(&record).unwrap();
                            }
                        })
                    })
                    .collect();
                for worker in workers {
                    worker.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_json_encode,
    bench_flare_handle,
    bench_filtered,
    bench_concurrent_handle,
);

criterion_main!(benches);
