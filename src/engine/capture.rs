//! Capture side: runs inside the driver's input callback.
//!
//! Driver blocks arrive in whatever size the host picks. They are
//! de-interleaved (first channel only), normalized to `f32` and gathered
//! into exact `chunk_size` chunks. Each complete chunk is metered, processed
//! (unless bypassed), metered again and pushed to the transfer queue.
//!
//! Nothing here blocks: the preset is loaded lock-free, meters are atomics,
//! and the queue push evicts instead of waiting. Chunk buffers come from a
//! shared [`ChunkPool`] and evicted chunks go straight back to it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::backend::{CaptureCallback, PcmData, PcmInput};
use super::meter::Levels;
use super::pool::ChunkPool;
use super::queue::TransferQueue;
use crate::buffer::{i16_to_f32, i32_to_f32, peak};
use crate::voice::VoiceProcessor;

pub struct CapturePath {
    processor: VoiceProcessor,
    pending: Vec<f32>,
    chunk_size: usize,
    bypass: Arc<AtomicBool>,
    levels: Arc<Levels>,
    queue: Arc<TransferQueue<Vec<f32>>>,
    pool: Arc<ChunkPool>,
}

impl CapturePath {
    pub fn new(
        processor: VoiceProcessor,
        bypass: Arc<AtomicBool>,
        levels: Arc<Levels>,
        queue: Arc<TransferQueue<Vec<f32>>>,
        pool: Arc<ChunkPool>,
    ) -> Self {
        let chunk_size = processor.chunk_size().max(1);
        Self {
            processor,
            pending: pool.take(),
            chunk_size,
            bypass,
            levels,
            queue,
            pool,
        }
    }

    /// Box this path up as a driver callback.
    pub fn into_callback(mut self) -> CaptureCallback {
        Box::new(move |input| self.on_input(input))
    }

    /// Consume one driver block.
    pub fn on_input(&mut self, input: PcmInput<'_>) {
        let step = input.channels.max(1);
        match input.data {
            PcmData::I16(samples) => {
                for &s in samples.iter().step_by(step) {
                    self.push_sample(i16_to_f32(s));
                }
            }
            PcmData::I32(samples) => {
                for &s in samples.iter().step_by(step) {
                    self.push_sample(i32_to_f32(s));
                }
            }
            PcmData::F32(samples) => {
                for &s in samples.iter().step_by(step) {
                    self.push_sample(s);
                }
            }
        }
    }

    #[inline]
    fn push_sample(&mut self, sample: f32) {
        self.pending.push(sample);
        if self.pending.len() >= self.chunk_size {
            let chunk = std::mem::replace(&mut self.pending, self.pool.take());
            self.process_chunk(chunk);
        }
    }

    /// Meter, transform and enqueue one complete chunk.
    pub fn process_chunk(&mut self, mut chunk: Vec<f32>) {
        self.levels.input.set(peak(&chunk));
        if !self.bypass.load(Ordering::Relaxed) {
            self.processor.process_in_place(&mut chunk);
        }
        self.levels.output.set(peak(&chunk));
        if let Some(evicted) = self.queue.push(chunk) {
            self.pool.give(evicted);
        }
    }
}
