//! Recycled chunk buffers shared by the capture and playback paths.
//!
//! ```text
//! capture ──take()──► fill, process ──push──► TransferQueue ──pop──► playback
//!    ▲                                   │ evicted                      │ written
//!    └───────────────────── give() ◄─────┴──────────────────────────────┘
//! ```
//!
//! The pool is pre-filled when a session opens, so the driver callback only
//! allocates if every buffer is in flight at once.

use crossbeam_channel::{bounded, Receiver, Sender};

pub struct ChunkPool {
    tx: Sender<Vec<f32>>,
    rx: Receiver<Vec<f32>>,
    chunk_size: usize,
}

impl ChunkPool {
    /// A pool holding `buffers` empty vectors of `chunk_size` capacity.
    pub fn new(buffers: usize, chunk_size: usize) -> Self {
        let (tx, rx) = bounded(buffers.max(1));
        for _ in 0..buffers {
            let _ = tx.try_send(Vec::with_capacity(chunk_size));
        }
        Self { tx, rx, chunk_size }
    }

    /// An empty buffer, recycled when one is available.
    pub fn take(&self) -> Vec<f32> {
        self.rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(self.chunk_size))
    }

    /// Return a buffer. It is dropped if the pool is already full.
    pub fn give(&self, mut buffer: Vec<f32>) {
        buffer.clear();
        let _ = self.tx.try_send(buffer);
    }

    /// Buffers currently idle in the pool.
    pub fn available(&self) -> usize {
        self.rx.len()
    }
}
