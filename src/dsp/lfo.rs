//! Low Frequency Oscillator phase.

/*
Free-running LFOs
=================

The phaser (0.5 Hz) and tremolo (5 Hz) sweep at control rate. Their phase is
the only oscillator state that survives from one chunk to the next:

    phase += 2π × rate × frames / sample_rate      (once per chunk)
    phase  = phase mod 2π

Within a chunk the phaser reads the phase once (one delay time per chunk),
while tremolo evaluates sin(2π × rate × t + phase) per sample with t
starting at 0 for the chunk. Advancing by exactly the chunk duration is what
makes the tremolo sweep continuous across chunk boundaries.

The phase is FREE-RUNNING: it is never reset on preset change, only when the
owning processor is built.

Ring modulation deliberately does NOT use this: its 200 Hz carrier restarts
at t = 0 for every chunk (see `dsp/modulation.rs`).


Bipolar to Unipolar
-------------------

    unipolar = (bipolar + 1.0) * 0.5

    bipolar   unipolar
    -1.0      0.0
     0.0      0.5
    +1.0      1.0
*/

use std::f32::consts::TAU;

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Persistent phase accumulator for a fixed-rate LFO.
#[derive(Debug, Clone)]
pub struct Lfo {
    rate_hz: f32,
    phase: f32,
}

impl Lfo {
    pub fn new(rate_hz: f32) -> Self {
        Self { rate_hz, phase: 0.0 }
    }

    pub fn rate_hz(&self) -> f32 {
        self.rate_hz
    }

    /// Current phase in radians, always in `[0, 2π)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Bipolar LFO value at the current phase.
    pub fn value(&self) -> f32 {
        self.phase.sin()
    }

    /// Move the phase forward by `frames` samples.
    pub fn advance(&mut self, frames: usize, sample_rate: f32) {
        let step = TAU * self.rate_hz * frames as f32 / sample_rate;
        self.phase = (self.phase + step).rem_euclid(TAU);
    }
}
