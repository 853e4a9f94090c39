use std::sync::atomic::{AtomicU32, Ordering};

/// Single-writer peak level readable from any thread without locking.
///
/// The capture callback stores the peak of each chunk; a UI polls it. A
/// reader may see a value one chunk stale, which is fine for a meter.
#[derive(Debug, Default)]
pub struct LevelMeter {
    bits: AtomicU32,
}

impl LevelMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, level: f32) {
        self.bits.store(level.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn reset(&self) {
        self.set(0.0);
    }
}

/// Input and output peak meters for one engine.
#[derive(Debug, Default)]
pub struct Levels {
    pub input: LevelMeter,
    pub output: LevelMeter,
}
