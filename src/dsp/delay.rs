//! Within-chunk delay taps.
//!
//! Resonance and the phaser both add a delayed copy of the *current* chunk to
//! itself. The delay source never reaches back into the previous chunk: the
//! first `delay` samples of the chunk see a zero-filled tap.
//!
//! ```text
//! y[i] = x[i] + gain × x[i - delay]     (i >= delay)
//! y[i] = x[i]                            (i <  delay)
//! ```
//!
//! Walking the buffer from the end keeps `x[i - delay]` unmodified when it is
//! read, so no scratch copy is needed.

/// Add `gain × x[i - delay]` to every `x[i]` in place.
pub fn add_delayed(buffer: &mut [f32], delay: usize, gain: f32) {
    if delay == 0 {
        for sample in buffer.iter_mut() {
            *sample += *sample * gain;
        }
        return;
    }
    for i in (delay..buffer.len()).rev() {
        buffer[i] += buffer[i - delay] * gain;
    }
}

/// Convert a delay time in seconds to whole samples.
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> usize {
    (seconds * sample_rate).round().max(0.0) as usize
}

/// Resonance comb: a 10ms tap at `resonance` gain, no feedback.
pub const RESONANCE_DELAY_SECS: f32 = 0.01;

pub fn comb_resonance(buffer: &mut [f32], resonance: f32, sample_rate: f32) {
    let delay = seconds_to_samples(RESONANCE_DELAY_SECS, sample_rate);
    add_delayed(buffer, delay, resonance);
}
