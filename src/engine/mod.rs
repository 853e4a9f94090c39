//! Audio I/O engine: devices, capture, playback and lifecycle.
//!
//! ```text
//! driver ─► capture callback ─► VoiceProcessor ─► TransferQueue ─► playback thread ─► device write
//!               │                                                                    (blocking)
//!               └─► input / output level meters
//! ```
//!
//! # States
//!
//! ```text
//! Idle ──start()──► Starting ──ok──► Running ──stop()──► Stopping ──► Idle
//!                      │
//!                      └──open/spawn failure──► Idle   (everything opened so far is released)
//! ```
//!
//! The capture callback is owned by the driver; the playback loop runs on a
//! thread the engine spawns. `stop()` is cooperative: it drops the run flag,
//! closes both devices, waits a bounded time for the playback thread, and
//! drains whatever is left in the queue.

pub mod backend;
mod capture;
mod cpal_backend;
mod meter;
mod playback;
mod pool;
pub mod queue;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

pub use backend::{
    AudioBackend, CaptureCallback, DeviceHandle, DeviceInfo, OutputStream, PcmData, PcmInput,
    PcmWriter, SessionFault, StreamFormat,
};
pub use capture::CapturePath;
pub use cpal_backend::CpalBackend;
pub use meter::{LevelMeter, Levels};
pub use pool::ChunkPool;
pub use queue::TransferQueue;

use self::playback::{PlaybackLoop, PlaybackThread};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::voice::{Preset, PresetSlot, VoiceProcessor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Starting,
    Running,
    Stopping,
}

/// Everything that exists only while the engine runs.
struct Session {
    input: Option<Box<dyn DeviceHandle>>,
    output: Option<Box<dyn DeviceHandle>>,
    playback: Option<PlaybackThread>,
    queue: Arc<TransferQueue<Vec<f32>>>,
    running: Arc<AtomicBool>,
    fault: Arc<SessionFault>,
}

impl Session {
    /// Best-effort teardown; every step is attempted even if an earlier one fails.
    fn teardown(mut self, config: &EngineConfig) {
        self.running.store(false, Ordering::Release);

        if let Some(input) = self.input.take() {
            if let Err(err) = input.close() {
                warn!(%err, "failed to close input device");
            }
        }
        if let Some(output) = self.output.take() {
            if let Err(err) = output.close() {
                warn!(%err, "failed to close output device");
            }
        }
        if let Some(playback) = self.playback.take() {
            if !playback.join_timeout(config.join_timeout) {
                warn!(
                    timeout = ?config.join_timeout,
                    "playback thread did not exit in time, abandoning it"
                );
            }
        }

        let drained = self.queue.drain();
        debug!(drained, dropped = self.queue.dropped(), "transfer queue drained");
    }
}

fn release(handle: Box<dyn DeviceHandle>) {
    if let Err(err) = handle.close() {
        warn!(%err, "failed to release device after aborted start");
    }
}

/// Realtime voice changer engine.
///
/// All methods are called from one control thread (typically a UI). Only
/// `start` and `stop` block, and only briefly.
pub struct AudioEngine<B: AudioBackend = CpalBackend> {
    backend: B,
    config: EngineConfig,
    state: EngineState,
    input_device: Option<String>,
    output_device: Option<String>,
    preset: PresetSlot,
    bypass: Arc<AtomicBool>,
    levels: Arc<Levels>,
    session: Option<Session>,
}

impl AudioEngine<CpalBackend> {
    /// Engine on the platform's default cpal host.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_backend(CpalBackend::new(), config)
    }
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn with_backend(backend: B, config: EngineConfig) -> Self {
        Self {
            backend,
            config,
            state: EngineState::Idle,
            input_device: None,
            output_device: None,
            preset: PresetSlot::new(),
            bypass: Arc::new(AtomicBool::new(false)),
            levels: Arc::new(Levels::default()),
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn list_input_devices(&self) -> Result<Vec<DeviceInfo>, EngineError> {
        Ok(self.backend.input_devices()?)
    }

    pub fn list_output_devices(&self) -> Result<Vec<DeviceInfo>, EngineError> {
        Ok(self.backend.output_devices()?)
    }

    pub fn input_device(&self) -> Option<&str> {
        self.input_device.as_deref()
    }

    pub fn output_device(&self) -> Option<&str> {
        self.output_device.as_deref()
    }

    /// Select the capture device. A running engine is restarted on it.
    pub fn set_input_device(&mut self, id: impl Into<String>) -> Result<(), EngineError> {
        let id = id.into();
        info!(device = %id, "input device selected");
        self.with_restart(|engine| engine.input_device = Some(id))
    }

    /// Select the playback device. A running engine is restarted on it.
    pub fn set_output_device(&mut self, id: impl Into<String>) -> Result<(), EngineError> {
        let id = id.into();
        info!(device = %id, "output device selected");
        self.with_restart(|engine| engine.output_device = Some(id))
    }

    fn with_restart(&mut self, change: impl FnOnce(&mut Self)) -> Result<(), EngineError> {
        let was_running = self.is_running();
        if was_running {
            self.stop();
        }
        change(self);
        if was_running {
            self.start()?;
        }
        Ok(())
    }

    /// Swap in a new active preset. Effect state is not reset.
    pub fn set_preset(&self, preset: Preset) {
        info!(preset = %preset.name, "preset selected");
        self.preset.store(preset);
    }

    /// Drop the active preset; processing becomes a pass-through.
    pub fn clear_preset(&self) {
        self.preset.clear();
    }

    pub fn preset(&self) -> Option<Arc<Preset>> {
        self.preset.load()
    }

    pub fn set_bypass(&self, bypass: bool) {
        self.bypass.store(bypass, Ordering::Relaxed);
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass.load(Ordering::Relaxed)
    }

    /// Peak of the most recent captured chunk.
    pub fn input_level(&self) -> f32 {
        self.levels.input.get()
    }

    /// Peak of the most recent processed chunk.
    pub fn output_level(&self) -> f32 {
        self.levels.output.get()
    }

    /// Chunks evicted from the transfer queue during the current session.
    pub fn dropped_chunks(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.queue.dropped())
    }

    /// Chunks currently waiting for playback.
    pub fn queued_chunks(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.queue.len())
    }

    /// Open both devices and start streaming.
    ///
    /// Fails with [`EngineError::DevicesNotSelected`] unless both devices are
    /// set. On any open or spawn failure the engine returns to `Idle` with
    /// nothing left open. Starting a running engine is a no-op.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.is_running() {
            return Ok(());
        }
        let devices = (self.input_device.clone(), self.output_device.clone());
        let (Some(input_id), Some(output_id)) = devices else {
            warn!("start requested before devices were selected");
            return Err(EngineError::DevicesNotSelected);
        };

        self.state = EngineState::Starting;
        match self.open_session(&input_id, &output_id) {
            Ok(session) => {
                self.session = Some(session);
                self.state = EngineState::Running;
                info!(input = %input_id, output = %output_id, "engine running");
                Ok(())
            }
            Err(err) => {
                self.state = EngineState::Idle;
                error!(%err, "engine failed to start");
                Err(err)
            }
        }
    }

    fn open_session(&self, input_id: &str, output_id: &str) -> Result<Session, EngineError> {
        let format = StreamFormat {
            sample_rate: self.config.sample_rate,
            chunk_size: self.config.chunk_size,
        };
        let queue = Arc::new(TransferQueue::new(self.config.queue_capacity));
        let running = Arc::new(AtomicBool::new(true));
        let fault = SessionFault::new();
        // Enough buffers for a full queue plus the chunk in flight on each side
        let pool = Arc::new(ChunkPool::new(
            self.config.queue_capacity + 4,
            self.config.chunk_size,
        ));

        let processor = VoiceProcessor::with_slot(
            self.config.sample_rate,
            self.config.chunk_size,
            self.preset.clone(),
        );
        let capture = CapturePath::new(
            processor,
            self.bypass.clone(),
            self.levels.clone(),
            queue.clone(),
            pool.clone(),
        );

        let input = self
            .backend
            .open_input(input_id, format, capture.into_callback(), fault.clone())?;

        let output = match self.backend.open_output(output_id, format, fault.clone()) {
            Ok(output) => output,
            Err(err) => {
                release(input);
                return Err(err.into());
            }
        };

        let playback = PlaybackLoop {
            queue: queue.clone(),
            pool,
            writer: output.writer,
            running: running.clone(),
            fault: fault.clone(),
            pop_timeout: self.config.pop_timeout,
        };
        let thread = match PlaybackThread::spawn(playback) {
            Ok(thread) => thread,
            Err(err) => {
                running.store(false, Ordering::Release);
                release(input);
                release(output.handle);
                return Err(EngineError::Spawn(err));
            }
        };

        Ok(Session {
            input: Some(input),
            output: Some(output.handle),
            playback: Some(thread),
            queue,
            running,
            fault,
        })
    }

    /// Stop streaming and release both devices.
    ///
    /// Always ends in `Idle`. Teardown problems are logged, not returned.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            self.state = EngineState::Stopping;
            session.teardown(&self.config);
            info!("engine stopped");
        }
        self.levels.input.reset();
        self.levels.output.reset();
        self.state = EngineState::Idle;
    }

    /// Check the running session for an asynchronous device fault.
    ///
    /// A faulted session is torn down to `Idle` and the fault returned. Meant
    /// to be polled from the control thread.
    pub fn supervise(&mut self) -> Result<(), EngineError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        if !session.fault.is_tripped() {
            return Ok(());
        }
        let reason = session
            .fault
            .reason()
            .unwrap_or_else(|| "unknown device fault".to_string());
        error!(%reason, "audio session faulted, stopping");
        self.stop();
        Err(EngineError::SessionFault(reason))
    }
}

impl<B: AudioBackend> Drop for AudioEngine<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
