//! Whole-chain benchmarks.
//!
//! Each factory preset runs through a `VoiceProcessor` exactly as the capture
//! callback would drive it.

mod presets;

pub use presets::bench_presets;
