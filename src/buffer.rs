//! Sample buffer conversions.
//!
//! Everything inside the pipeline is mono `f32` in `[-1.0, 1.0]`. Integer PCM
//! is normalized on the way in by dividing by the format's full-scale
//! magnitude, and converted back to 16-bit on the way out.
//!
//! ```text
//!   i16  →  x / 32768.0
//!   i32  →  x / 2147483648.0
//!   f32  →  x (unchanged)
//! ```
//!
//! Before a chunk leaves the effect chain it is forced to exactly N samples
//! (truncate, or zero-pad the tail) and hard-clipped. Resampling stages may
//! change the length in between.

/// Full-scale magnitude of signed 16-bit PCM.
pub const I16_FULL_SCALE: f32 = 32768.0;
/// Full-scale magnitude of signed 32-bit PCM.
pub const I32_FULL_SCALE: f32 = 2_147_483_648.0;

/// Convert one 16-bit PCM sample to a normalized float.
#[inline]
pub fn i16_to_f32(sample: i16) -> f32 {
    sample as f32 / I16_FULL_SCALE
}

/// Convert one 32-bit PCM sample to a normalized float.
#[inline]
pub fn i32_to_f32(sample: i32) -> f32 {
    sample as f32 / I32_FULL_SCALE
}

/// Convert a normalized float to 16-bit PCM, clamping out-of-range input.
#[inline]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Convert a whole chunk to 16-bit PCM, reusing `out`'s allocation.
pub fn to_i16_into(samples: &[f32], out: &mut Vec<i16>) {
    out.clear();
    out.extend(samples.iter().map(|&s| f32_to_i16(s)));
}

/// Force `buffer` to exactly `len` samples and hard-clip every sample.
///
/// Runs unconditionally at the end of the effect chain.
pub fn renormalize(buffer: &mut Vec<f32>, len: usize) {
    buffer.resize(len, 0.0);
    hard_clip(buffer);
}

/// Clamp every sample to `[-1.0, 1.0]` in place. NaN becomes silence.
pub fn hard_clip(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = if sample.is_nan() { 0.0 } else { sample.clamp(-1.0, 1.0) };
    }
}

/// Replace NaN and infinite samples with 0.0; returns how many were replaced.
///
/// One bad sample reaching a stateful stage would poison its history.
pub fn sanitize(buffer: &mut [f32]) -> usize {
    let mut replaced = 0;
    for sample in buffer.iter_mut().filter(|s| !s.is_finite()) {
        *sample = 0.0;
        replaced += 1;
    }
    replaced
}

/// Maximum absolute sample value (0.0 for an empty buffer).
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// True when every sample is a finite number.
pub fn is_finite(buffer: &[f32]) -> bool {
    buffer.iter().all(|s| s.is_finite())
}
