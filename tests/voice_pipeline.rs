//! End-to-end properties of the effect chain, driven through `VoiceProcessor`.

use voxshift::dsp::resample::resample_into;
use voxshift::voice::Stage;
use voxshift::{presets, Preset, StageError, VoiceProcessor};

const SR: u32 = 44_100;
const N: usize = 1024;

fn sine(len: usize, hz: f32, amp: f32) -> Vec<f32> {
    (0..len)
        .map(|i| amp * (std::f32::consts::TAU * hz * i as f32 / SR as f32).sin())
        .collect()
}

fn impulse(len: usize) -> Vec<f32> {
    let mut buffer = vec![0.0; len];
    buffer[0] = 1.0;
    buffer
}

#[test]
fn output_length_is_always_chunk_size() {
    let mut candidates = presets::all();
    candidates.extend([
        Preset::new("fast").speed(2.0),
        Preset::new("slow").speed(0.5),
        Preset::new("up").pitch_shift(1.9),
        Preset::new("down").pitch_shift(0.4),
        Preset::new("both").speed(1.3).pitch_shift(0.8).formant_shift(1.2),
    ]);

    let input = sine(N, 220.0, 0.6);
    for preset in candidates {
        let name = preset.name.clone();
        let mut processor = VoiceProcessor::new(SR, N);
        processor.set_preset(preset);
        for _ in 0..3 {
            assert_eq!(processor.process(&input).len(), N, "{name}");
        }
    }
}

#[test]
fn output_is_always_clipped() {
    let loud: Vec<f32> = sine(N, 150.0, 4.0);
    let preset = Preset::new("hot")
        .low_boost(3.0)
        .high_boost(3.0)
        .resonance(1.0)
        .reverb(1.0)
        .clean_boost(10.0);

    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(preset);
    for _ in 0..4 {
        let out = processor.process(&loud);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}

#[test]
fn no_preset_is_exact_identity() {
    let mut processor = VoiceProcessor::new(SR, N);
    // Out-of-range and odd-length input pass through untouched too
    let input: Vec<f32> = sine(N + 7, 300.0, 2.5);
    assert_eq!(processor.process(&input), input);

    processor.set_preset(presets::robot());
    processor.clear_preset();
    assert_eq!(processor.process(&input), input);
}

#[test]
fn resonance_adds_ten_ms_echo() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("comb").resonance(0.5));
    let input = impulse(N);
    let out = processor.process(&input);

    assert_eq!(out[0], 1.0);
    assert!((out[441] - 0.5).abs() < 1e-6);
    for i in 442..N {
        let expected = input[i] + input[i - 441] * 0.5;
        assert!((out[i] - expected).abs() < 1e-6, "index {i}");
    }
}

#[test]
fn full_distortion_is_pure_tanh() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("fuzz").distortion(1.0));
    let input = sine(N, 440.0, 0.3);
    let out = processor.process(&input);
    for (x, y) in input.iter().zip(&out) {
        assert!((y - (3.0 * x).tanh()).abs() < 1e-6);
    }
}

#[test]
fn double_speed_halves_then_pads() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("fast").speed(2.0));
    let input: Vec<f32> = (0..N).map(|i| i as f32 / N as f32).collect();
    let out = processor.process(&input);

    assert_eq!(out.len(), N);
    // 512 resampled samples span the whole input ramp, the rest is padding
    assert_eq!(out[0], 0.0);
    assert!((out[511] - input[N - 1]).abs() < 1e-5);
    assert!(out[512..].iter().all(|&s| s == 0.0));
}

#[test]
fn pitch_shift_stretches_then_restores_length() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("up").pitch_shift(1.6));
    let input = sine(N, 330.0, 0.6);
    let out = processor.process(&input);

    // 1024 / 1.6 = 640 samples, then back to 1024
    let mut stretched = Vec::new();
    resample_into(&input, 640, &mut stretched);
    let mut expected = Vec::new();
    resample_into(&stretched, N, &mut expected);

    assert_eq!(out.len(), N);
    for (i, (y, e)) in out.iter().zip(&expected).enumerate() {
        assert!((y - e).abs() < 1e-6, "index {i}: {y} vs {e}");
    }
    // Lossy: the intermediate has fewer points than the input
    assert!(out.iter().zip(&input).any(|(y, x)| (y - x).abs() > 1e-3));
}

#[test]
fn pitch_shift_by_hand_on_short_chunk() {
    let mut processor = VoiceProcessor::new(SR, 4);
    processor.set_preset(Preset::new("up").pitch_shift(2.0));
    // 4 / 2 = 2 samples: [x0, x3] = [0.0, 0.9]; back to 4: evenly spaced line
    let out = processor.process(&[0.0, 0.8, -0.4, 0.9]);
    let expected = [0.0, 0.3, 0.6, 0.9];
    for (y, e) in out.iter().zip(expected) {
        assert!((y - e).abs() < 1e-6, "{out:?}");
    }
}

#[test]
fn non_finite_input_is_silenced_and_reverb_survives() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("room").reverb(0.5));

    let mut bad = sine(N, 200.0, 0.5);
    bad[100] = f32::NAN;
    let out = processor.process(&bad);
    assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert_eq!(out[100], 0.0);

    for _ in 0..20 {
        let mut chunk = sine(N, 200.0, 0.5);
        let report = processor.process_in_place(&mut chunk);
        assert!(report.is_clean(), "{report:?}");
    }
}

#[test]
fn infinite_input_does_not_disable_low_cut() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("cut").low_cut(100.0));

    let mut bad = sine(N, 200.0, 0.5);
    bad[0] = f32::INFINITY;
    processor.process(&bad);

    for _ in 0..10 {
        let mut chunk = sine(N, 200.0, 0.5);
        assert!(!processor.process_in_place(&mut chunk).was_skipped(Stage::LowCut));
    }
}

#[test]
fn reverb_carries_across_chunks() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("hall").reverb(1.0));

    processor.process(&impulse(N));
    let silent = vec![0.0; N];
    let second = processor.process(&silent);
    let third = processor.process(&silent);

    assert!(second.iter().all(|&s| s == 0.0));
    // Tap sits 2205 samples behind the impulse: 2205 - 2048 = 157 into chunk three
    let expected = 0.3 * (0.7 * 0.5);
    assert!((third[157] - expected).abs() < 1e-6, "got {}", third[157]);
    assert!(third[..157].iter().all(|&s| s == 0.0));
}

#[test]
fn failing_stage_is_rolled_back_and_chain_continues() {
    let mut processor = VoiceProcessor::new(SR, N);
    processor.set_preset(Preset::new("bad").formant_shift(-1.0).clean_boost(0.5));

    let input = sine(N, 200.0, 0.5);
    let mut chunk = input.clone();
    let report = processor.process_in_place(&mut chunk);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].stage, Stage::FormantShift);
    assert!(matches!(
        report.skipped[0].error,
        StageError::InvalidParameter { name: "formant_shift", .. }
    ));
    for (x, y) in input.iter().zip(&chunk) {
        assert!((y - x * 0.5).abs() < 1e-6);
    }
}

#[test]
fn degenerate_chunk_does_not_panic() {
    let mut processor = VoiceProcessor::new(SR, 1);
    processor.set_preset(presets::monster());
    let out = processor.process(&[0.5]);
    assert_eq!(out.len(), 1);
    assert!(out[0].is_finite());
}
