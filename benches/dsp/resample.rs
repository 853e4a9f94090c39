//! Benchmarks for linear-interpolation resampling (speed and pitch stages).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::dsp::resample::resample_into;

use crate::{voice_like, CHUNK_SIZES};

pub fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resample");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);
        let mut stretched = Vec::with_capacity(size * 2);
        let mut restored = Vec::with_capacity(size);

        // Pitch stage: stretch then squash back to the original length
        group.bench_with_input(BenchmarkId::new("pitch_up", size), &size, |b, _| {
            b.iter(|| {
                resample_into(black_box(&input), (size as f32 * 1.6) as usize, &mut stretched);
                resample_into(&stretched, size, &mut restored);
            })
        });

        group.bench_with_input(BenchmarkId::new("speed_half", size), &size, |b, _| {
            b.iter(|| resample_into(black_box(&input), size / 2, &mut stretched))
        });
    }

    group.finish();
}
