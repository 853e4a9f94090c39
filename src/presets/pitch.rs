//! Pitch-driven presets.
//!
//! Both lean on the resample-based pitch stage and pull the formants along
//! with it, so the result reads as a different-sized speaker rather than a
//! sped-up tape.

use crate::voice::Preset;

/// High, small and bright.
pub fn chipmunk() -> Preset {
    Preset::new("Chipmunk")
        .pitch_shift(1.6)
        .formant_shift(1.3)
        .low_cut(150.0)
}

/// Low and heavy, with the top end rolled off.
pub fn deep() -> Preset {
    Preset::new("Deep")
        .pitch_shift(0.7)
        .formant_shift(0.8)
        .low_boost(1.4)
        .high_cut(6000.0)
}
