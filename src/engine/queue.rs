//! Bounded drop-oldest transfer queue between capture and playback.
//!
//! ```text
//! push (full):   [c0 c1 c2 … c19] + c20  →  [c1 c2 … c19 c20]     c0 dropped
//! pop (empty):   waits up to `timeout`, then returns None
//! ```
//!
//! Pushing never blocks and the queue never grows past its capacity: once
//! playback falls behind, it hears the most recent run of chunks rather than
//! drifting further and further behind the live input.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

pub struct TransferQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    capacity: usize,
    dropped: AtomicU64,
}

impl<T> TransferQueue<T> {
    pub fn new(capacity: usize) -> Self {
        // A zero-capacity channel is a rendezvous, which would make push block
        let capacity = capacity.max(1);
        let (tx, rx) = bounded(capacity);
        Self {
            tx,
            rx,
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue `item`, evicting the oldest entry first if the queue is full.
    ///
    /// Returns the last evicted entry so the caller can recycle it.
    pub fn push(&self, item: T) -> Option<T> {
        let mut item = item;
        let mut evicted = None;
        loop {
            match self.tx.try_send(item) {
                Ok(()) => return evicted,
                Err(TrySendError::Full(rejected)) => {
                    // The consumer may pop between the failed send and this
                    // receive, in which case one entry is evicted needlessly
                    // and counted. Latency stays bounded either way.
                    if let Ok(old) = self.rx.try_recv() {
                        self.dropped.fetch_add(1, Ordering::Relaxed);
                        evicted = Some(old);
                    }
                    item = rejected;
                }
                // Both ends live in `self`
                Err(TrySendError::Disconnected(_)) => return evicted,
            }
        }
    }

    /// Dequeue the oldest entry, waiting at most `timeout` for one to arrive.
    pub fn pop(&self, timeout: Duration) -> Option<T> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Dequeue without waiting.
    pub fn try_pop(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Discard everything queued; returns how many entries were dropped.
    pub fn drain(&self) -> usize {
        self.rx.try_iter().count()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries evicted by `push` since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_fifo_order() {
        let queue = TransferQueue::new(4);
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.try_pop(), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), Some(3));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_overflow_keeps_newest() {
        let queue = TransferQueue::new(20);
        for i in 0..50 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 20);
        assert_eq!(queue.dropped(), 30);
        let drained: Vec<i32> = std::iter::from_fn(|| queue.try_pop()).collect();
        assert_eq!(drained, (30..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_push_returns_evicted() {
        let queue = TransferQueue::new(2);
        assert_eq!(queue.push(1), None);
        assert_eq!(queue.push(2), None);
        assert_eq!(queue.push(3), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
    }

    #[test]
    fn test_pop_times_out() {
        let queue: TransferQueue<u8> = TransferQueue::new(2);
        let start = Instant::now();
        assert_eq!(queue.pop(Duration::from_millis(20)), None);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_pop_wakes_on_push() {
        let queue = Arc::new(TransferQueue::new(2));
        let producer = queue.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.push(7u8);
        });
        assert_eq!(queue.pop(Duration::from_secs(2)), Some(7));
        handle.join().unwrap();
    }

    #[test]
    fn test_drain() {
        let queue = TransferQueue::new(8);
        for i in 0..5 {
            queue.push(i);
        }
        assert_eq!(queue.drain(), 5);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let queue = TransferQueue::new(0);
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.capacity(), 1);
        assert_eq!(queue.try_pop(), Some(2));
    }
}
