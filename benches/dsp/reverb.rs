//! Benchmarks for the feedback reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::dsp::FeedbackReverb;

use crate::{voice_like, CHUNK_SIZES, SAMPLE_RATE};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);
        let mut buffer = input.clone();

        let mut reverb = FeedbackReverb::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("light", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                reverb.render(black_box(&mut buffer), 0.2);
            })
        });

        let mut reverb = FeedbackReverb::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                reverb.render(black_box(&mut buffer), 1.0);
            })
        });
    }

    group.finish();
}
