//! Benchmarks for the FFT-based stages (formant shift, shelves).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::dsp::spectral::{formant_shift, high_shelf, low_shelf};
use voxshift::dsp::SpectralTransform;

use crate::{voice_like, CHUNK_SIZES, SAMPLE_RATE};

pub fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/spectral");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);

        let mut transform = SpectralTransform::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("formant_shift", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                formant_shift(&mut transform, black_box(&mut buffer), 1.3, SAMPLE_RATE)
            })
        });

        let mut transform = SpectralTransform::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("low_shelf", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                low_shelf(&mut transform, black_box(&mut buffer), 1.5, SAMPLE_RATE)
            })
        });

        let mut transform = SpectralTransform::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("high_shelf", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                high_shelf(&mut transform, black_box(&mut buffer), 1.3, SAMPLE_RATE)
            })
        });
    }

    group.finish();
}
