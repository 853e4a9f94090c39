//! Reverb - a single feedback delay line
//!
//! Much simpler than a Schroeder network: one circular buffer, one tap.
//!
//! ```text
//!            ┌──────────────── × amount·0.5 ◄── tap (50ms ago) ◄──┐
//!            ▼                                                    │
//! x[i] ──►  (+) ──► wet[i] ──► × 0.7 ──► buffer[write_pos] ───────┘
//!
//! y[i] = (1 - 0.3·amount)·x[i] + 0.3·amount·wet[i]
//! ```
//!
//! The buffer holds 100ms and is read 50ms behind the write cursor, so each
//! echo recirculates through the buffer twice per lap. The 0.7 damping on the
//! write keeps the loop gain below one for any `amount <= 1`.
//!
//! This stage is inherently sequential: every output depends on the buffer
//! contents written by earlier samples, including those of previous chunks.

/// Seconds of history held by the ring buffer.
pub const BUFFER_SECS: f32 = 0.1;
/// How far behind the write cursor the tap reads.
pub const TAP_SECS: f32 = 0.05;
/// Gain applied to the wet sample before it is written back.
pub const FEEDBACK_DAMPING: f32 = 0.7;
/// Scale of the tap added to the input.
pub const TAP_GAIN: f32 = 0.5;
/// Scale of the final wet/dry blend.
pub const WET_SCALE: f32 = 0.3;

/// Persistent ring buffer reverb (allocated once, RT-safe afterwards)
pub struct FeedbackReverb {
    buffer: Vec<f32>,
    write_pos: usize,
    tap_offset: usize,
}

impl FeedbackReverb {
    pub fn new(sample_rate: f32) -> Self {
        let capacity = ((BUFFER_SECS * sample_rate).round() as usize).max(1);
        let tap_offset = ((TAP_SECS * sample_rate).round() as usize).min(capacity - 1);
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
            tap_offset,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn tap_offset(&self) -> usize {
        self.tap_offset
    }

    /// Silence the delay line and rewind the write cursor.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Process one sample; returns the wet signal before the final blend.
    #[inline]
    pub fn next_sample(&mut self, input: f32, amount: f32) -> f32 {
        let capacity = self.buffer.len();
        let read_pos = (self.write_pos + capacity - self.tap_offset) % capacity;
        let wet = input + self.buffer[read_pos] * amount * TAP_GAIN;
        self.buffer[self.write_pos] = wet * FEEDBACK_DAMPING;
        self.write_pos = (self.write_pos + 1) % capacity;
        wet
    }

    /// Run the whole chunk through the delay line, then blend wet and dry.
    pub fn render(&mut self, buffer: &mut [f32], amount: f32) {
        let wet_gain = WET_SCALE * amount;
        let dry_gain = 1.0 - wet_gain;
        for sample in buffer.iter_mut() {
            let dry = *sample;
            let wet = self.next_sample(dry, amount);
            *sample = dry_gain * dry + wet_gain * wet;
        }
    }
}
