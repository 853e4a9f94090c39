//! The seam between the engine and an audio driver.
//!
//! Input is callback-driven: the driver calls back with whatever block of
//! interleaved frames it has. Output is a blocking writer: `write` returns
//! once the device has accepted every sample, which is what paces the
//! playback thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::DeviceError;

/// A selectable device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
}

/// Format requested when opening a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub chunk_size: usize,
}

/// Raw interleaved samples delivered by a capture callback.
#[derive(Debug, Clone, Copy)]
pub enum PcmData<'a> {
    I16(&'a [i16]),
    I32(&'a [i32]),
    F32(&'a [f32]),
}

/// One driver callback's worth of input.
#[derive(Debug, Clone, Copy)]
pub struct PcmInput<'a> {
    pub data: PcmData<'a>,
    pub channels: usize,
}

impl<'a> PcmInput<'a> {
    pub fn mono_i16(samples: &'a [i16]) -> Self {
        Self {
            data: PcmData::I16(samples),
            channels: 1,
        }
    }

    pub fn mono_f32(samples: &'a [f32]) -> Self {
        Self {
            data: PcmData::F32(samples),
            channels: 1,
        }
    }

    pub fn frames(&self) -> usize {
        let channels = self.channels.max(1);
        match self.data {
            PcmData::I16(s) => s.len() / channels,
            PcmData::I32(s) => s.len() / channels,
            PcmData::F32(s) => s.len() / channels,
        }
    }
}

pub type CaptureCallback = Box<dyn FnMut(PcmInput<'_>) + Send + 'static>;

/// An open device. Closing it stops any further callbacks or writes.
pub trait DeviceHandle {
    fn close(self: Box<Self>) -> Result<(), DeviceError>;
}

/// Blocking mono 16-bit sink for the playback thread.
pub trait PcmWriter: Send {
    fn write(&mut self, samples: &[i16]) -> Result<(), DeviceError>;
}

/// Opened output: the handle stays with the engine, the writer moves to the
/// playback thread.
pub struct OutputStream {
    pub handle: Box<dyn DeviceHandle>,
    pub writer: Box<dyn PcmWriter>,
}

/// Asynchronous device failure shared between driver callbacks, the
/// playback thread and the engine.
#[derive(Debug, Default)]
pub struct SessionFault {
    tripped: AtomicBool,
    reason: Mutex<Option<String>>,
}

impl SessionFault {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a fault. The first reason wins.
    pub fn trip(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.reason.lock() {
            if slot.is_none() {
                *slot = Some(reason.into());
            }
        }
        self.tripped.store(true, Ordering::Release);
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    pub fn reason(&self) -> Option<String> {
        self.reason.lock().ok().and_then(|slot| slot.clone())
    }
}

/// Device enumeration and stream construction.
pub trait AudioBackend {
    fn input_devices(&self) -> Result<Vec<DeviceInfo>, DeviceError>;
    fn output_devices(&self) -> Result<Vec<DeviceInfo>, DeviceError>;
    fn default_input_device(&self) -> Option<DeviceInfo>;
    fn default_output_device(&self) -> Option<DeviceInfo>;

    /// Open `device_id` for capture; `on_input` is invoked from the driver.
    fn open_input(
        &self,
        device_id: &str,
        format: StreamFormat,
        on_input: CaptureCallback,
        fault: Arc<SessionFault>,
    ) -> Result<Box<dyn DeviceHandle>, DeviceError>;

    /// Open `device_id` for blocking playback.
    fn open_output(
        &self,
        device_id: &str,
        format: StreamFormat,
        fault: Arc<SessionFault>,
    ) -> Result<OutputStream, DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fault_reason_wins() {
        let fault = SessionFault::new();
        assert!(!fault.is_tripped());
        fault.trip("input stream died");
        fault.trip("output stream died");
        assert!(fault.is_tripped());
        assert_eq!(fault.reason().as_deref(), Some("input stream died"));
    }

    #[test]
    fn test_frames_per_channel_count() {
        let samples = [0i16; 12];
        let input = PcmInput {
            data: PcmData::I16(&samples),
            channels: 2,
        };
        assert_eq!(input.frames(), 6);
    }
}
