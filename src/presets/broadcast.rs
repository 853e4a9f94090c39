//! Band-limited "through a speaker" presets.
//!
//! Both band-pass the voice with the Butterworth cuts and then overdrive it.
//! Megaphone uses a narrower band and more drive.

use crate::voice::Preset;

/// AM radio: 300 Hz to 3.4 kHz with a little grit.
pub fn radio() -> Preset {
    Preset::new("Radio")
        .low_cut(300.0)
        .high_cut(3400.0)
        .distortion(0.3)
        .clean_boost(1.2)
}

pub fn megaphone() -> Preset {
    Preset::new("Megaphone")
        .low_cut(500.0)
        .high_cut(2500.0)
        .high_boost(1.3)
        .distortion(0.6)
        .clean_boost(1.4)
}
