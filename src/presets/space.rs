use crate::voice::Preset;

/// Big wet room: resonant comb plus the feedback reverb.
pub fn cave() -> Preset {
    Preset::new("Cave")
        .low_boost(1.2)
        .resonance(0.5)
        .reverb(0.6)
}
