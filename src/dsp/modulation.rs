//! Modulation effects: ring modulation, phaser and tremolo.
//!
//! ```text
//! ring mod:  y = (1-a)·x + a·x·sin(2π·200·t)             t restarts at 0 each chunk
//! phaser:    y = x + a·0.5·x[i - d]                       d = 5..8 ms from sin(lfo)
//! tremolo:   y = x·(1 + a·sin(2π·5·t + lfo))              lfo carried across chunks
//! ```
//!
//! The ring carrier is rebuilt from t = 0 for every chunk, so it jumps at
//! chunk boundaries. Phaser and tremolo keep their LFO phase in an [`Lfo`]
//! owned by the caller and advance it once per chunk by the nominal chunk
//! size, whatever length the speed stage left the buffer at.

use std::f32::consts::TAU;

use super::delay::{add_delayed, seconds_to_samples};
use super::lfo::{bipolar_to_unipolar, Lfo};
use super::mix::blend_in_place;

pub const RING_CARRIER_HZ: f32 = 200.0;
pub const PHASER_RATE_HZ: f32 = 0.5;
pub const TREMOLO_RATE_HZ: f32 = 5.0;

const PHASER_MIN_DELAY_SECS: f32 = 0.005;
const PHASER_SWEEP_SECS: f32 = 0.003;
const PHASER_TAP_GAIN: f32 = 0.5;

/// Multiply by a 200 Hz sine carrier, crossfaded by `amount`.
pub fn ring_modulate(buffer: &mut [f32], amount: f32, sample_rate: f32) {
    let w = TAU * RING_CARRIER_HZ / sample_rate;
    blend_in_place(buffer, amount, |i, x| x * (w * i as f32).sin());
}

/// Delay in samples the phaser uses for the LFO's current phase.
pub fn phaser_delay(lfo: &Lfo, sample_rate: f32) -> usize {
    let sweep = bipolar_to_unipolar(lfo.value());
    seconds_to_samples(PHASER_MIN_DELAY_SECS + PHASER_SWEEP_SECS * sweep, sample_rate)
}

/// Add a short modulated delayed copy of the chunk, then advance the LFO by
/// `chunk_frames`.
///
/// The wet signal is `x + 0.5·x[i-d]`; crossfading by `amount` reduces to
/// adding the tap at `amount·0.5`.
pub fn phaser(
    buffer: &mut [f32],
    amount: f32,
    lfo: &mut Lfo,
    chunk_frames: usize,
    sample_rate: f32,
) {
    let delay = phaser_delay(lfo, sample_rate);
    add_delayed(buffer, delay, amount * PHASER_TAP_GAIN);
    lfo.advance(chunk_frames, sample_rate);
}

/// Amplitude-modulate the chunk around unity gain, then advance the LFO by
/// `chunk_frames`.
pub fn tremolo(
    buffer: &mut [f32],
    amount: f32,
    lfo: &mut Lfo,
    chunk_frames: usize,
    sample_rate: f32,
) {
    let w = TAU * lfo.rate_hz() / sample_rate;
    let phase = lfo.phase();
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample *= 1.0 + amount * (w * i as f32 + phase).sin();
    }
    lfo.advance(chunk_frames, sample_rate);
}
