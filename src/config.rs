use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_CAPACITY, DEFAULT_SAMPLE_RATE};

/// Fixed runtime format and timing for an engine.
///
/// These values are set once at construction and are never renegotiated while
/// a session runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sample rate in Hz shared by input, output and every effect stage.
    pub sample_rate: u32,
    /// Frames per chunk (N). Every buffer leaving the effect chain has this length.
    pub chunk_size: usize,
    /// Processed chunks held between capture and playback before the oldest is dropped.
    pub queue_capacity: usize,
    /// How long the playback thread waits on an empty queue before re-checking the run flag.
    pub pop_timeout: Duration,
    /// Upper bound on waiting for the playback thread during `stop()`.
    pub join_timeout: Duration,
}

impl EngineConfig {
    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate as f32
    }

    /// Output-side latency ceiling implied by the queue capacity.
    pub fn max_queue_latency(&self) -> Duration {
        let frames = (self.chunk_size * self.queue_capacity) as f64;
        Duration::from_secs_f64(frames / self.sample_rate.max(1) as f64)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            pop_timeout: Duration::from_millis(100),
            join_timeout: Duration::from_secs(1),
        }
    }
}
