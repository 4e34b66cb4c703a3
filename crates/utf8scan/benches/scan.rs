//! Benchmarks for scanning mixed UTF-8 text.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use utf8scan::{AlignOptions, AnsiEscapes, Scratch, Span, length, length_escaped, nav, scalars};

/// Deterministic text of exactly `target_len` bytes: mostly ASCII with two-,
/// three- and four-byte scalars and one escape sequence per line.
fn make_payload(target_len: usize) -> Vec<u8> {
    let line = "\x1b[1mcafé\x1b[0m naïve 日本語 😀 plain ascii words\n".as_bytes();
    let mut out = Vec::with_capacity(target_len + line.len());
    while out.len() < target_len {
        out.extend_from_slice(line);
    }
    // Cut on a boundary so every benchmark sees well-formed text.
    let mut end = target_len;
    while out.get(end).is_some_and(|b| b & 0xc0 == 0x80) {
        end -= 1;
    }
    out.truncate(end);
    out
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");
    for size in [1 << 10, 1 << 16] {
        let payload = make_payload(size);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("next_bounded", size), &payload, |b, p| {
            b.iter(|| {
                let mut pos = 0;
                let mut n = 0usize;
                while pos < p.len() {
                    pos = nav::next_bounded(p, pos, p.len());
                    n += 1;
                }
                black_box(n)
            });
        });
        group.bench_with_input(BenchmarkId::new("scalars", size), &payload, |b, p| {
            b.iter(|| black_box(scalars(p).filter_map(Result::ok).fold(0u32, u32::wrapping_add)));
        });
        group.bench_with_input(BenchmarkId::new("std_chars", size), &payload, |b, p| {
            let text = std::str::from_utf8(p).expect("payload is valid UTF-8");
            b.iter(|| black_box(text.chars().map(u32::from).fold(0u32, u32::wrapping_add)));
        });
    }
    group.finish();
}

fn bench_backward(c: &mut Criterion) {
    let payload = make_payload(1 << 16);
    c.bench_function("backward/prev", |b| {
        b.iter(|| {
            let mut pos = payload.len();
            let mut n = 0usize;
            while pos > 0 {
                pos = nav::prev(&payload, pos);
                n += 1;
            }
            black_box(n)
        });
    });
}

fn bench_measure(c: &mut Criterion) {
    let payload = make_payload(1 << 16);
    let span = Span::from(&payload[..]);
    c.bench_function("measure/length", |b| b.iter(|| black_box(length(span))));
    c.bench_function("measure/length_escaped", |b| {
        b.iter(|| black_box(length_escaped(span, &AnsiEscapes)));
    });
}

fn bench_align(c: &mut Criterion) {
    let mut scratch = Scratch::with_capacity(64);
    let cells = ["café", "naïve", "日本語", "😀", "a longer cell value"];
    c.bench_function("align/scratch", |b| {
        b.iter(|| {
            let mut total = 0;
            for cell in cells {
                let opts = AlignOptions::left(12).with_precision(10);
                total += scratch.align(Span::from(cell), opts).len();
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_forward, bench_backward, bench_measure, bench_align);
criterion_main!(benches);
