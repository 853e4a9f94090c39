//! Character voices.
//!
//! # How They Work
//!
//! - Robot: ring modulation at the fixed carrier plus a short comb gives the
//!   metallic buzz
//! - Monster: pitched down, saturated and boomy
//! - Alien: pitched up with formants pushed the other way and a phaser sweep
//! - Ghost: thin and breathy, wobbling through the tremolo into a long tail

use crate::voice::Preset;

pub fn robot() -> Preset {
    Preset::new("Robot")
        .ring_mod(0.7)
        .resonance(0.4)
        .distortion(0.2)
}

pub fn monster() -> Preset {
    Preset::new("Monster")
        .pitch_shift(0.6)
        .formant_shift(0.7)
        .low_boost(1.5)
        .distortion(0.5)
        .reverb(0.2)
}

pub fn alien() -> Preset {
    Preset::new("Alien")
        .pitch_shift(1.3)
        .formant_shift(0.8)
        .ring_mod(0.3)
        .phaser(0.6)
}

pub fn ghost() -> Preset {
    Preset::new("Ghost")
        .low_cut(300.0)
        .high_boost(1.3)
        .tremolo(0.5)
        .reverb(0.7)
        .clean_boost(0.9)
}
