//! Benchmarks for visible width measurement.
//!
//! Run with: cargo bench -p termdelta-text

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use termdelta_text::{TextMeasure, visible_width_uncached};

fn ascii_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn cjk_text(len: usize) -> String {
    "\u{4E2D}\u{6587}\u{6D4B}\u{8BD5}\u{6587}\u{672C}"
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn emoji_text(len: usize) -> String {
    "\u{1F600}\u{1F389}\u{1F44D}\u{1F3FD}\u{2764}\u{FE0F}"
        .chars()
        .cycle()
        .take(len)
        .collect()
}

/// Colored log-style lines, the common case for a terminal pane.
fn styled_text(len: usize) -> String {
    "\x1b[32mINFO\x1b[0m request \x1b[1mok\x1b[0m \u{6D4B}\u{8BD5} "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn bench_uncached(c: &mut Criterion) {
    let inputs: [(&str, fn(usize) -> String); 4] = [
        ("ascii", ascii_text),
        ("cjk", cjk_text),
        ("emoji", emoji_text),
        ("styled", styled_text),
    ];

    for (name, make) in inputs {
        let mut group = c.benchmark_group(format!("width/{name}"));
        for len in [10, 100, 1000] {
            let text = make(len);
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
                b.iter(|| black_box(visible_width_uncached(text)))
            });
        }
        group.finish();
    }
}

fn bench_cache_vs_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_vs_direct");
    let lines: Vec<String> = (0..100).map(|i| format!("{i}: {}", styled_text(60))).collect();

    group.bench_function("direct", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(visible_width_uncached(line));
            }
        })
    });

    group.bench_function("cache_cold", |b| {
        b.iter(|| {
            let measure = TextMeasure::new();
            for line in &lines {
                black_box(measure.visible_width(line));
            }
        })
    });

    group.bench_function("cache_warm", |b| {
        let measure = TextMeasure::new();
        for line in &lines {
            let _ = measure.visible_width(line);
        }
        b.iter(|| {
            for line in &lines {
                black_box(measure.visible_width(line));
            }
        })
    });

    group.finish();
}

fn bench_wrap(c: &mut Criterion) {
    let measure = TextMeasure::new();
    let text = styled_text(2000);

    let mut group = c.benchmark_group("wrap");
    for width in [20, 80] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| black_box(measure.wrap_text_with_ansi(&text, width)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uncached, bench_cache_vs_direct, bench_wrap);
criterion_main!(benches);
