use std::fmt;

use super::preset::Preset;
use crate::error::StageError;

/// One step of the fixed effect chain, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Speed,
    PitchShift,
    FormantShift,
    LowCut,
    HighCut,
    LowBoost,
    HighBoost,
    Resonance,
    Distortion,
    RingMod,
    Phaser,
    Tremolo,
    Reverb,
    CleanBoost,
}

impl Stage {
    pub const ORDER: [Stage; 14] = [
        Stage::Speed,
        Stage::PitchShift,
        Stage::FormantShift,
        Stage::LowCut,
        Stage::HighCut,
        Stage::LowBoost,
        Stage::HighBoost,
        Stage::Resonance,
        Stage::Distortion,
        Stage::RingMod,
        Stage::Phaser,
        Stage::Tremolo,
        Stage::Reverb,
        Stage::CleanBoost,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Speed => "speed",
            Stage::PitchShift => "pitch_shift",
            Stage::FormantShift => "formant_shift",
            Stage::LowCut => "low_cut",
            Stage::HighCut => "high_cut",
            Stage::LowBoost => "low_boost",
            Stage::HighBoost => "high_boost",
            Stage::Resonance => "resonance",
            Stage::Distortion => "distortion",
            Stage::RingMod => "ring_mod",
            Stage::Phaser => "phaser",
            Stage::Tremolo => "tremolo",
            Stage::Reverb => "reverb",
            Stage::CleanBoost => "clean_boost",
        }
    }

    /// Whether `preset` turns this stage on.
    pub fn is_enabled(self, preset: &Preset) -> bool {
        match self {
            Stage::Speed => preset.speed != 1.0,
            Stage::PitchShift => preset.pitch_shift != 1.0,
            Stage::FormantShift => preset.formant_shift != 1.0,
            Stage::LowCut => preset.low_cut_hz.is_some(),
            Stage::HighCut => preset.high_cut_hz.is_some(),
            Stage::LowBoost => preset.low_boost_gain != 1.0,
            Stage::HighBoost => preset.high_boost_gain != 1.0,
            Stage::Resonance => preset.resonance != 0.0,
            Stage::Distortion => preset.distortion != 0.0,
            Stage::RingMod => preset.ring_mod != 0.0,
            Stage::Phaser => preset.phaser != 0.0,
            Stage::Tremolo => preset.tremolo != 0.0,
            Stage::Reverb => preset.reverb != 0.0,
            Stage::CleanBoost => preset.clean_boost != 1.0,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stage that was skipped for one chunk, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSkip {
    pub stage: Stage,
    pub error: StageError,
}

/// Outcome of running one chunk through the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainReport {
    pub skipped: Vec<StageSkip>,
}

impl ChainReport {
    /// True when every enabled stage ran.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_skipped(&self, stage: Stage) -> bool {
        self.skipped.iter().any(|skip| skip.stage == stage)
    }
}
