//! Benchmarks for the Butterworth cut filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::dsp::CutFilter;

use crate::{voice_like, CHUNK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);

        let mut filter = CutFilter::low_cut(SAMPLE_RATE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("low_cut", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 300.0)
            })
        });

        let mut filter = CutFilter::high_cut(SAMPLE_RATE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("high_cut", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), 3400.0)
            })
        });
    }

    group.finish();
}
