pub mod buffer; // PCM normalization and chunk renormalization
pub mod config;
pub mod dsp;
pub mod engine; // Device I/O, transfer queue, level meters
pub mod error;
pub mod presets;
pub mod voice; // Effect chain and preset handling

pub use config::EngineConfig;
pub use engine::{AudioEngine, EngineState};
pub use error::{DeviceError, EngineError, StageError};
pub use voice::{Preset, PresetSlot, VoiceProcessor};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;
