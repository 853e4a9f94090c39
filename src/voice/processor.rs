use std::sync::Arc;

use tracing::{debug, warn};

use super::preset::{Preset, PresetSlot};
use super::stage::{ChainReport, Stage, StageSkip};
use crate::buffer;
use crate::config::EngineConfig;
use crate::dsp::{
    delay::comb_resonance,
    distortion::saturate,
    modulation::{self, PHASER_RATE_HZ, TREMOLO_RATE_HZ},
    resample::{resample_into, scaled_len},
    spectral, CutFilter, FeedbackReverb, Lfo, SpectralTransform,
};
use crate::error::StageError;

/// Runs chunks through the fixed effect chain under the active preset.
///
/// The processor owns all state that outlives a chunk: cut filter sections,
/// the phaser and tremolo LFO phases, and the reverb ring buffer. That state
/// is created here and never reset on a preset change, so effects carry on
/// smoothly when the user switches voices.
///
/// `process` is meant to be called from one context only (the capture
/// callback). The preset can be swapped from anywhere through the shared
/// [`PresetSlot`].
pub struct VoiceProcessor {
    sample_rate: f32,
    chunk_size: usize,
    preset: PresetSlot,
    spectral: SpectralTransform,
    low_cut: CutFilter,
    high_cut: CutFilter,
    phaser_lfo: Lfo,
    tremolo_lfo: Lfo,
    reverb: FeedbackReverb,
    /// Resampling target, swapped with the chunk after speed changes
    resampled: Vec<f32>,
    /// Pre-stage copy restored when a stage fails
    rollback: Vec<f32>,
}

impl VoiceProcessor {
    pub fn new(sample_rate: u32, chunk_size: usize) -> Self {
        Self::with_slot(sample_rate, chunk_size, PresetSlot::new())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.sample_rate, config.chunk_size)
    }

    /// Build a processor reading its preset from an existing shared slot.
    pub fn with_slot(sample_rate: u32, chunk_size: usize, preset: PresetSlot) -> Self {
        let sr = sample_rate as f32;
        Self {
            sample_rate: sr,
            chunk_size,
            preset,
            spectral: SpectralTransform::new(),
            low_cut: CutFilter::low_cut(sr),
            high_cut: CutFilter::high_cut(sr),
            phaser_lfo: Lfo::new(PHASER_RATE_HZ),
            tremolo_lfo: Lfo::new(TREMOLO_RATE_HZ),
            reverb: FeedbackReverb::new(sr),
            resampled: Vec::with_capacity(chunk_size * 2),
            rollback: Vec::with_capacity(chunk_size * 2),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Replace the active preset. Stage state is left untouched.
    pub fn set_preset(&self, preset: Preset) {
        self.preset.store(preset);
    }

    /// Deactivate processing; `process` becomes the identity.
    pub fn clear_preset(&self) {
        self.preset.clear();
    }

    pub fn preset(&self) -> Option<Arc<Preset>> {
        self.preset.load()
    }

    pub fn preset_slot(&self) -> &PresetSlot {
        &self.preset
    }

    /// Process a copy of `input` and return it.
    pub fn process(&mut self, input: &[f32]) -> Vec<f32> {
        let mut chunk = input.to_vec();
        self.process_in_place(&mut chunk);
        chunk
    }

    /// Run the chain over `chunk` in place.
    ///
    /// With no active preset the chunk is left exactly as it was. Otherwise
    /// every enabled stage runs in order, a failing stage is rolled back and
    /// reported, and the chunk is finally forced to `chunk_size` samples in
    /// `[-1.0, 1.0]`.
    pub fn process_in_place(&mut self, chunk: &mut Vec<f32>) -> ChainReport {
        let mut report = ChainReport::default();
        let Some(preset) = self.preset.load() else {
            return report;
        };

        let replaced = buffer::sanitize(chunk);
        if replaced > 0 {
            debug!(replaced, "non-finite input samples silenced");
        }

        for stage in Stage::ORDER {
            if stage.is_enabled(&preset) {
                self.apply(stage, &preset, chunk, &mut report);
            }
        }

        buffer::renormalize(chunk, self.chunk_size);
        report
    }

    fn apply(
        &mut self,
        stage: Stage,
        preset: &Preset,
        chunk: &mut Vec<f32>,
        report: &mut ChainReport,
    ) {
        self.rollback.clone_from(chunk);

        let result = self.run(stage, preset, chunk).and_then(|()| {
            if buffer::is_finite(chunk) {
                Ok(())
            } else {
                Err(StageError::NonFinite)
            }
        });

        if let Err(error) = result {
            std::mem::swap(chunk, &mut self.rollback);
            if error == StageError::NonFinite {
                self.reset_state(stage);
            }
            warn!(stage = stage.name(), preset = %preset.name, %error, "effect stage skipped");
            report.skipped.push(StageSkip { stage, error });
        }
    }

    /// Forget the history of a stateful stage whose output went non-finite.
    fn reset_state(&mut self, stage: Stage) {
        match stage {
            Stage::LowCut => self.low_cut.reset(),
            Stage::HighCut => self.high_cut.reset(),
            Stage::Reverb => self.reverb.reset(),
            _ => {}
        }
    }

    fn run(
        &mut self,
        stage: Stage,
        preset: &Preset,
        chunk: &mut Vec<f32>,
    ) -> Result<(), StageError> {
        let sr = self.sample_rate;
        match stage {
            Stage::Speed => {
                let new_len = scaled_len(chunk.len(), preset.speed, "speed")?;
                resample_into(chunk, new_len, &mut self.resampled);
                std::mem::swap(chunk, &mut self.resampled);
            }
            Stage::PitchShift => {
                let original = chunk.len();
                let stretched = scaled_len(original, preset.pitch_shift, "pitch_shift")?;
                resample_into(chunk, stretched, &mut self.resampled);
                resample_into(&self.resampled, original, chunk);
            }
            Stage::FormantShift => {
                spectral::formant_shift(&mut self.spectral, chunk, preset.formant_shift, sr)?;
            }
            Stage::LowCut => {
                if let Some(hz) = preset.low_cut_hz {
                    self.low_cut.render(chunk, hz)?;
                }
            }
            Stage::HighCut => {
                if let Some(hz) = preset.high_cut_hz {
                    self.high_cut.render(chunk, hz)?;
                }
            }
            Stage::LowBoost => {
                spectral::low_shelf(&mut self.spectral, chunk, preset.low_boost_gain, sr)?;
            }
            Stage::HighBoost => {
                spectral::high_shelf(&mut self.spectral, chunk, preset.high_boost_gain, sr)?;
            }
            Stage::Resonance => comb_resonance(chunk, preset.resonance, sr),
            Stage::Distortion => saturate(chunk, preset.distortion),
            Stage::RingMod => modulation::ring_modulate(chunk, preset.ring_mod, sr),
            Stage::Phaser => modulation::phaser(
                chunk,
                preset.phaser,
                &mut self.phaser_lfo,
                self.chunk_size,
                sr,
            ),
            Stage::Tremolo => modulation::tremolo(
                chunk,
                preset.tremolo,
                &mut self.tremolo_lfo,
                self.chunk_size,
                sr,
            ),
            Stage::Reverb => self.reverb.render(chunk, preset.reverb),
            Stage::CleanBoost => {
                for sample in chunk.iter_mut() {
                    *sample *= preset.clean_boost;
                }
            }
        }
        Ok(())
    }
}
