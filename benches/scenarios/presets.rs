use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use voxshift::{presets, VoiceProcessor};

use crate::{voice_like, CHUNK_SIZES, SAMPLE_RATE};

pub fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/presets");

    for &size in CHUNK_SIZES {
        let input = voice_like(size);

        for preset in presets::all() {
            let name = preset.name.to_lowercase();
            let mut processor = VoiceProcessor::new(SAMPLE_RATE as u32, size);
            processor.set_preset(preset);
            let mut chunk = input.clone();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    chunk.clear();
                    chunk.extend_from_slice(&input);
                    processor.process_in_place(black_box(&mut chunk))
                })
            });
        }

        // Bypass cost: no preset, identity path
        let mut processor = VoiceProcessor::new(SAMPLE_RATE as u32, size);
        let mut chunk = input.clone();
        group.bench_with_input(BenchmarkId::new("no_preset", size), &size, |b, _| {
            b.iter(|| processor.process_in_place(black_box(&mut chunk)))
        });
    }

    group.finish();
}
