//! Distortion / Waveshaping
//!
//! The voice chain uses a single tanh soft clipper. The `amount` parameter
//! does two jobs at once: it raises the drive and it sets the wet/dry mix.
//!
//! ```text
//! drive  = 1 + amount × 2          (1.0 ..= 3.0)
//! wet    = tanh(x × drive)
//! output = (1 - amount) × x + amount × wet
//! ```
//!
//! At `amount = 1.0` the crossfade collapses to the wet signal, so the output
//! is exactly `tanh(3x)`. tanh never leaves (-1, 1), so a fully wet chunk
//! cannot clip.

use super::mix::blend_in_place;

/// Drive applied for a given distortion amount.
#[inline]
pub fn drive_for(amount: f32) -> f32 {
    1.0 + amount * 2.0
}

/// tanh soft clip at the given drive.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    (sample * drive).tanh()
}

/// Apply drive-scaled tanh saturation, crossfaded with the dry signal.
pub fn saturate(buffer: &mut [f32], amount: f32) {
    let drive = drive_for(amount);
    blend_in_place(buffer, amount, |_, x| soft_clip(x, drive));
}
