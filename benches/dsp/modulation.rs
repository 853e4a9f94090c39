//! Benchmarks for the time-domain modulation stages.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::dsp::delay::comb_resonance;
use voxshift::dsp::distortion::saturate;
use voxshift::dsp::modulation::{phaser, ring_modulate, tremolo, PHASER_RATE_HZ, TREMOLO_RATE_HZ};
use voxshift::dsp::Lfo;

use crate::{voice_like, CHUNK_SIZES, SAMPLE_RATE};

pub fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/modulation");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("ring_mod", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                ring_modulate(black_box(&mut buffer), 0.7, SAMPLE_RATE);
            })
        });

        let mut lfo = Lfo::new(PHASER_RATE_HZ);
        group.bench_with_input(BenchmarkId::new("phaser", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                phaser(black_box(&mut buffer), 0.6, &mut lfo, size, SAMPLE_RATE);
            })
        });

        let mut lfo = Lfo::new(TREMOLO_RATE_HZ);
        group.bench_with_input(BenchmarkId::new("tremolo", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                tremolo(black_box(&mut buffer), 0.5, &mut lfo, size, SAMPLE_RATE);
            })
        });

        group.bench_with_input(BenchmarkId::new("resonance", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                comb_resonance(black_box(&mut buffer), 0.5, SAMPLE_RATE);
            })
        });

        group.bench_with_input(BenchmarkId::new("distortion", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                saturate(black_box(&mut buffer), 0.5);
            })
        });
    }

    group.finish();
}
