//! Low-level DSP primitives used by the voice effect chain.
//!
//! Each module covers one transform over a chunk of mono `f32` samples. The
//! stateful ones (cut filters, LFOs, reverb) are small owned structs so that
//! several processors can coexist without shared or global state.

/// Within-chunk delayed-copy mixing (resonance comb, phaser tap).
pub mod delay;
/// tanh soft clipping with drive tied to the mix amount.
pub mod distortion;
/// Streaming 2nd-order Butterworth low-cut and high-cut.
pub mod filter;
/// Free-running LFO phase.
pub mod lfo;
/// Linear wet/dry crossfade.
pub mod mix;
/// Ring modulation, phaser, tremolo.
pub mod modulation;
/// Linear-interpolation resampling.
pub mod resample;
/// Feedback ring-buffer reverb.
pub mod reverb;
/// FFT-based formant shift and spectral-mask shelves.
pub mod spectral;

pub use filter::{CutFilter, CutKind};
pub use lfo::Lfo;
pub use reverb::FeedbackReverb;
pub use spectral::SpectralTransform;
