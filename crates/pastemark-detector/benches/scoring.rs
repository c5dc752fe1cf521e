//! Benchmarks for detection scoring on clipboard-sized inputs.
//!
//! The clipboard pipeline caps input at ~100 kB; scoring must stay in the
//! low-millisecond range at that size.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate mixed markdown-ish content of roughly `target_len` bytes.
fn generate_mixed(target_len: usize) -> String {
    let mut text = String::with_capacity(target_len + 128);
    let mut section = 0;
    while text.len() < target_len {
        section += 1;
        text.push_str(&format!("## Section {section}\n\n"));
        text.push_str("Some **bold** text with a [link](https://example.com) and `code`.\n\n");
        text.push_str("- first item\n- second item\n\n");
        text.push_str("| a | b |\n|---|---|\n| 1 | 2 |\n\n");
    }
    text
}

/// Generate plain prose with no markdown syntax.
fn generate_prose(target_len: usize) -> String {
    let mut text = String::with_capacity(target_len + 128);
    while text.len() < target_len {
        text.push_str("The quick brown fox jumps over the lazy dog near the riverbank. ");
    }
    text
}

fn bench_score_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_mixed");
    for size in [1_000, 10_000, 100_000] {
        let text = generate_mixed(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| pastemark_detector::score(text));
        });
    }
    group.finish();
}

fn bench_score_prose(c: &mut Criterion) {
    let text = generate_prose(100_000);
    c.bench_function("score_prose_100k", |b| {
        b.iter(|| pastemark_detector::score(&text));
    });
}

fn bench_detect(c: &mut Criterion) {
    let text = generate_mixed(100_000);
    c.bench_function("detect_mixed_100k", |b| {
        b.iter(|| pastemark_detector::detect(&text, 2));
    });
}

criterion_group!(benches, bench_score_mixed, bench_score_prose, bench_detect);
criterion_main!(benches);
