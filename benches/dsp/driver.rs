//! Benchmarks for buffer rendering through the shared atomics.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use gamma40::{PlaybackDriver, PlaybackState, ToneMode};

use crate::BLOCK_SIZES;

pub fn bench_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback/driver");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut driver = PlaybackDriver::new(Arc::new(PlaybackState::default()));
        group.bench_with_input(BenchmarkId::new("playing", size), &size, |b, _| {
            b.iter(|| driver.render_block(black_box(&mut buffer)))
        });

        let mut driver = PlaybackDriver::new(Arc::new(PlaybackState::new(false, ToneMode::Pulsed)));
        group.bench_with_input(BenchmarkId::new("paused", size), &size, |b, _| {
            b.iter(|| driver.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
