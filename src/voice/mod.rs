//! The voice effect chain.
//!
//! ```text
//! chunk ─► speed ─► pitch ─► formant ─► low cut ─► high cut ─► low boost
//!       ─► high boost ─► resonance ─► distortion ─► ring mod ─► phaser
//!       ─► tremolo ─► reverb ─► clean boost ─► resize to N + hard clip
//! ```
//!
//! Each stage is a no-op while the active preset leaves it disabled. A stage
//! whose numerical routine fails is skipped for that chunk only: the chunk is
//! restored to its pre-stage contents and processing continues.

mod preset;
mod processor;
mod stage;

pub use preset::{Preset, PresetSlot};
pub use processor::VoiceProcessor;
pub use stage::{ChainReport, Stage, StageSkip};
