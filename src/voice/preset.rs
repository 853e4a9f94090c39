//! Preset parameters and the lock-free slot the active preset lives in.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named bundle of effect parameters.
///
/// Multiplicative parameters (`speed`, `pitch_shift`, `formant_shift`,
/// `low_boost_gain`, `high_boost_gain`, `clean_boost`) disable their stage at
/// 1.0. Mix parameters (`resonance`, `distortion`, `ring_mod`, `phaser`,
/// `tremolo`, `reverb`) disable their stage at 0.0. The cut filters are off
/// when their cutoff is `None`.
///
/// A preset is never edited while it is active: build a new one and hand it
/// to [`PresetSlot::store`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub speed: f32,
    pub pitch_shift: f32,
    pub formant_shift: f32,
    pub low_cut_hz: Option<f32>,
    pub high_cut_hz: Option<f32>,
    pub low_boost_gain: f32,
    pub high_boost_gain: f32,
    pub resonance: f32,
    pub distortion: f32,
    pub ring_mod: f32,
    pub phaser: f32,
    pub tremolo: f32,
    pub reverb: f32,
    pub clean_boost: f32,
}

impl Preset {
    /// A preset with every stage disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speed: 1.0,
            pitch_shift: 1.0,
            formant_shift: 1.0,
            low_cut_hz: None,
            high_cut_hz: None,
            low_boost_gain: 1.0,
            high_boost_gain: 1.0,
            resonance: 0.0,
            distortion: 0.0,
            ring_mod: 0.0,
            phaser: 0.0,
            tremolo: 0.0,
            reverb: 0.0,
            clean_boost: 1.0,
        }
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn pitch_shift(mut self, shift: f32) -> Self {
        self.pitch_shift = shift;
        self
    }

    pub fn formant_shift(mut self, shift: f32) -> Self {
        self.formant_shift = shift;
        self
    }

    pub fn low_cut(mut self, hz: f32) -> Self {
        self.low_cut_hz = Some(hz);
        self
    }

    pub fn high_cut(mut self, hz: f32) -> Self {
        self.high_cut_hz = Some(hz);
        self
    }

    pub fn low_boost(mut self, gain: f32) -> Self {
        self.low_boost_gain = gain;
        self
    }

    pub fn high_boost(mut self, gain: f32) -> Self {
        self.high_boost_gain = gain;
        self
    }

    pub fn resonance(mut self, amount: f32) -> Self {
        self.resonance = amount;
        self
    }

    pub fn distortion(mut self, amount: f32) -> Self {
        self.distortion = amount;
        self
    }

    pub fn ring_mod(mut self, amount: f32) -> Self {
        self.ring_mod = amount;
        self
    }

    pub fn phaser(mut self, amount: f32) -> Self {
        self.phaser = amount;
        self
    }

    pub fn tremolo(mut self, amount: f32) -> Self {
        self.tremolo = amount;
        self
    }

    pub fn reverb(mut self, amount: f32) -> Self {
        self.reverb = amount;
        self
    }

    pub fn clean_boost(mut self, gain: f32) -> Self {
        self.clean_boost = gain;
        self
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Normal")
    }
}

/// Shared cell holding the active preset.
///
/// Writers (a UI thread) swap in a whole new preset with a single atomic
/// pointer store; the capture callback loads it without locking. Readers
/// therefore see either the old preset or the new one, never a mix.
#[derive(Clone, Default)]
pub struct PresetSlot {
    inner: Arc<ArcSwapOption<Preset>>,
}

impl PresetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, preset: Preset) {
        self.inner.store(Some(Arc::new(preset)));
    }

    pub fn clear(&self) {
        self.inner.store(None);
    }

    pub fn load(&self) -> Option<Arc<Preset>> {
        self.inner.load_full()
    }
}

impl std::fmt::Debug for PresetSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PresetSlot").field(&self.load()).finish()
    }
}
