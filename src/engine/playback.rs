//! Playback side: a dedicated thread draining the transfer queue into a
//! blocking device writer.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, error};

use super::backend::{PcmWriter, SessionFault};
use super::pool::ChunkPool;
use super::queue::TransferQueue;
use crate::buffer::to_i16_into;

pub struct PlaybackLoop {
    pub queue: Arc<TransferQueue<Vec<f32>>>,
    /// Written chunks go back here for the capture path to refill
    pub pool: Arc<ChunkPool>,
    pub writer: Box<dyn PcmWriter>,
    pub running: Arc<AtomicBool>,
    pub fault: Arc<SessionFault>,
    pub pop_timeout: Duration,
}

impl PlaybackLoop {
    /// Pop, convert, write; until the run flag drops or the device fails.
    pub fn run(mut self) {
        let mut pcm = Vec::new();
        while self.running.load(Ordering::Acquire) {
            // Timeout is the idle point where the run flag gets re-checked
            let Some(chunk) = self.queue.pop(self.pop_timeout) else {
                continue;
            };
            to_i16_into(&chunk, &mut pcm);
            self.pool.give(chunk);
            if let Err(err) = self.writer.write(&pcm) {
                if self.running.load(Ordering::Acquire) {
                    error!(%err, "playback write failed");
                    self.fault.trip(format!("playback: {err}"));
                }
                break;
            }
        }
        debug!("playback loop exited");
    }
}

/// Handle to the running playback thread.
pub struct PlaybackThread {
    handle: JoinHandle<()>,
    done: Receiver<()>,
}

/// Signals completion even if the loop panics.
struct DoneGuard(Sender<()>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        let _ = self.0.try_send(());
    }
}

impl PlaybackThread {
    pub fn spawn(playback: PlaybackLoop) -> io::Result<Self> {
        let (done_tx, done) = bounded(1);
        let handle = thread::Builder::new()
            .name("voxshift-playback".into())
            .spawn(move || {
                let _guard = DoneGuard(done_tx);
                playback.run();
            })?;
        Ok(Self { handle, done })
    }

    /// Wait up to `timeout` for the thread to finish.
    ///
    /// Returns false if it did not; the thread is then detached rather than
    /// blocking the caller forever.
    pub fn join_timeout(self, timeout: Duration) -> bool {
        match self.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = self.handle.join();
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeviceError;
    use std::sync::Mutex;

    struct Collect(Arc<Mutex<Vec<i16>>>);

    impl PcmWriter for Collect {
        fn write(&mut self, samples: &[i16]) -> Result<(), DeviceError> {
            self.0.lock().unwrap().extend_from_slice(samples);
            Ok(())
        }
    }

    struct Stuck;

    impl PcmWriter for Stuck {
        fn write(&mut self, _samples: &[i16]) -> Result<(), DeviceError> {
            thread::sleep(Duration::from_secs(5));
            Ok(())
        }
    }

    struct Broken;

    impl PcmWriter for Broken {
        fn write(&mut self, _samples: &[i16]) -> Result<(), DeviceError> {
            Err(DeviceError::Write("unplugged".into()))
        }
    }

    struct Harness {
        queue: Arc<TransferQueue<Vec<f32>>>,
        pool: Arc<ChunkPool>,
        running: Arc<AtomicBool>,
        fault: Arc<SessionFault>,
    }

    fn playback(writer: Box<dyn PcmWriter>) -> (PlaybackLoop, Harness) {
        let queue = Arc::new(TransferQueue::new(4));
        let pool = Arc::new(ChunkPool::new(0, 4));
        let running = Arc::new(AtomicBool::new(true));
        let fault = SessionFault::new();
        let pl = PlaybackLoop {
            queue: queue.clone(),
            pool: pool.clone(),
            writer,
            running: running.clone(),
            fault: fault.clone(),
            pop_timeout: Duration::from_millis(10),
        };
        let harness = Harness { queue, pool, running, fault };
        (pl, harness)
    }

    #[test]
    fn test_writes_converted_chunks() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let (pl, h) = playback(Box::new(Collect(sink.clone())));
        h.queue.push(vec![0.5, -1.0]);
        let thread = PlaybackThread::spawn(pl).unwrap();
        thread::sleep(Duration::from_millis(50));
        h.running.store(false, Ordering::Release);
        assert!(thread.join_timeout(Duration::from_secs(1)));
        assert_eq!(*sink.lock().unwrap(), vec![16383, -32767]);
        // The spent chunk was handed back for reuse
        assert_eq!(h.pool.available(), 1);
    }

    #[test]
    fn test_join_times_out_on_stuck_writer() {
        let (pl, h) = playback(Box::new(Stuck));
        h.queue.push(vec![0.0]);
        let thread = PlaybackThread::spawn(pl).unwrap();
        thread::sleep(Duration::from_millis(30));
        h.running.store(false, Ordering::Release);
        assert!(!thread.join_timeout(Duration::from_millis(50)));
    }

    #[test]
    fn test_write_failure_trips_fault() {
        let (pl, h) = playback(Box::new(Broken));
        h.queue.push(vec![0.0]);
        let thread = PlaybackThread::spawn(pl).unwrap();
        assert!(thread.join_timeout(Duration::from_secs(1)));
        assert!(h.fault.is_tripped());
    }
}
