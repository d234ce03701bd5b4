//! Benchmarks for per-sample generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gamma40::{generate_sample, ToneMode};

use crate::BLOCK_SIZES;

pub fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/generator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Pulsed - mostly the silent branch
        group.bench_with_input(BenchmarkId::new("pulsed", size), &size, |b, _| {
            b.iter(|| {
                for (i, slot) in buffer.iter_mut().enumerate() {
                    *slot = generate_sample(black_box(i as u64), ToneMode::Pulsed);
                }
            })
        });

        // Pulsed, burst only - sin() plus fade every sample
        group.bench_with_input(BenchmarkId::new("burst", size), &size, |b, _| {
            b.iter(|| {
                for (i, slot) in buffer.iter_mut().enumerate() {
                    *slot = generate_sample(black_box((i % 44) as u64), ToneMode::Pulsed);
                }
            })
        });

        // Continuous - sin() every sample
        group.bench_with_input(BenchmarkId::new("continuous", size), &size, |b, _| {
            b.iter(|| {
                for (i, slot) in buffer.iter_mut().enumerate() {
                    *slot = generate_sample(black_box(i as u64), ToneMode::Continuous);
                }
            })
        });
    }

    group.finish();
}
