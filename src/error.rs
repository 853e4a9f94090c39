//! Error types for the engine, the device boundary and individual effect stages.

use thiserror::Error;

/// Errors surfaced to the caller of [`crate::AudioEngine`].
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("devices not selected: both an input and an output device are required")]
    DevicesNotSelected,

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("failed to spawn playback thread")]
    Spawn(#[source] std::io::Error),

    #[error("audio session faulted: {0}")]
    SessionFault(String),
}

/// Failures at the device boundary (open, write, close, enumerate).
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("device not found: {id}")]
    NotFound { id: String },

    #[error("failed to open device {id}: {reason}")]
    Open { id: String, reason: String },

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to enumerate devices: {0}")]
    Enumerate(String),

    #[error("device write failed: {0}")]
    Write(String),

    #[error("failed to close device: {0}")]
    Close(String),

    #[error("device is closed")]
    Closed,
}

/// Why a single effect stage was skipped for one chunk.
///
/// A skipped stage leaves the chunk exactly as it was before the stage ran.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("buffer of {len} samples is too short for this stage")]
    DegenerateLength { len: usize },

    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("filter design failed: {0}")]
    Filter(String),

    #[error("stage produced a non-finite sample")]
    NonFinite,
}
