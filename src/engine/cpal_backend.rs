//! cpal-backed devices.
//!
//! Input streams call straight into the capture path. cpal has no blocking
//! output mode, so output is built from two halves joined by an `rtrb` ring:
//!
//! ```text
//! playback thread ──write()──► Producer<i16> ══ring══ Consumer<i16> ◄── cpal output callback
//!                  (sleeps while full)                    (zero-fills on underrun,
//!                                                          fans mono out to every channel)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{error, info};

use super::backend::{
    AudioBackend, CaptureCallback, DeviceHandle, DeviceInfo, OutputStream, PcmData, PcmInput,
    PcmWriter, SessionFault, StreamFormat,
};
use crate::buffer::i16_to_f32;
use crate::error::DeviceError;

/// Chunks of headroom in the output ring.
const OUTPUT_RING_CHUNKS: usize = 4;
/// How long a full ring makes the writer sleep before retrying.
const WRITE_BACKOFF: Duration = Duration::from_millis(1);

pub struct CpalBackend {
    host: cpal::Host,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    fn find_input(&self, id: &str) -> Result<cpal::Device, DeviceError> {
        let mut devices = self
            .host
            .input_devices()
            .map_err(|e| DeviceError::Enumerate(e.to_string()))?;
        devices
            .find(|d| d.name().map(|n| n == id).unwrap_or(false))
            .ok_or_else(|| DeviceError::NotFound { id: id.to_string() })
    }

    fn find_output(&self, id: &str) -> Result<cpal::Device, DeviceError> {
        let mut devices = self
            .host
            .output_devices()
            .map_err(|e| DeviceError::Enumerate(e.to_string()))?;
        devices
            .find(|d| d.name().map(|n| n == id).unwrap_or(false))
            .ok_or_else(|| DeviceError::NotFound { id: id.to_string() })
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(device: &cpal::Device) -> Option<DeviceInfo> {
    // Names double as ids: cpal 0.16 has no stable device identifier
    device.name().ok().map(|name| DeviceInfo {
        id: name.clone(),
        name,
    })
}

fn open_error(id: &str, reason: impl std::fmt::Display) -> DeviceError {
    DeviceError::Open {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

impl AudioBackend for CpalBackend {
    fn input_devices(&self) -> Result<Vec<DeviceInfo>, DeviceError> {
        let devices = self
            .host
            .input_devices()
            .map_err(|e| DeviceError::Enumerate(e.to_string()))?;
        Ok(devices.filter_map(|d| describe(&d)).collect())
    }

    fn output_devices(&self) -> Result<Vec<DeviceInfo>, DeviceError> {
        let devices = self
            .host
            .output_devices()
            .map_err(|e| DeviceError::Enumerate(e.to_string()))?;
        Ok(devices.filter_map(|d| describe(&d)).collect())
    }

    fn default_input_device(&self) -> Option<DeviceInfo> {
        self.host.default_input_device().as_ref().and_then(describe)
    }

    fn default_output_device(&self) -> Option<DeviceInfo> {
        self.host.default_output_device().as_ref().and_then(describe)
    }

    fn open_input(
        &self,
        device_id: &str,
        format: StreamFormat,
        mut on_input: CaptureCallback,
        fault: Arc<SessionFault>,
    ) -> Result<Box<dyn DeviceHandle>, DeviceError> {
        let device = self.find_input(device_id)?;
        let supported = device.default_input_config().map_err(|e| open_error(device_id, e))?;
        let channels = supported.channels() as usize;
        let config = cpal::StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(format.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = move |err: cpal::StreamError| {
            error!(%err, "input stream error");
            fault.trip(format!("input stream: {err}"));
        };

        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    on_input(PcmInput {
                        data: PcmData::I16(data),
                        channels,
                    })
                },
                err_fn,
                None,
            ),
            cpal::SampleFormat::I32 => device.build_input_stream(
                &config,
                move |data: &[i32], _: &cpal::InputCallbackInfo| {
                    on_input(PcmInput {
                        data: PcmData::I32(data),
                        channels,
                    })
                },
                err_fn,
                None,
            ),
            cpal::SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    on_input(PcmInput {
                        data: PcmData::F32(data),
                        channels,
                    })
                },
                err_fn,
                None,
            ),
            other => return Err(DeviceError::UnsupportedFormat(format!("{other:?}"))),
        }
        .map_err(|e| open_error(device_id, e))?;

        stream.play().map_err(|e| open_error(device_id, e))?;
        let sample_rate = format.sample_rate;
        info!(device = device_id, channels, sample_rate, "input stream opened");

        Ok(Box::new(CpalHandle {
            stream,
            closed: None,
        }))
    }

    fn open_output(
        &self,
        device_id: &str,
        format: StreamFormat,
        fault: Arc<SessionFault>,
    ) -> Result<OutputStream, DeviceError> {
        let device = self.find_output(device_id)?;
        let supported = device.default_output_config().map_err(|e| open_error(device_id, e))?;
        let channels = supported.channels() as usize;
        let config = cpal::StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(format.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (producer, mut consumer) =
            RingBuffer::<i16>::new(format.chunk_size.max(1) * OUTPUT_RING_CHUNKS);

        let err_fault = fault.clone();
        let err_fn = move |err: cpal::StreamError| {
            error!(%err, "output stream error");
            err_fault.trip(format!("output stream: {err}"));
        };

        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => device.build_output_stream(
                &config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    fill_frames(data, channels, &mut consumer, |s| s)
                },
                err_fn,
                None,
            ),
            cpal::SampleFormat::I32 => device.build_output_stream(
                &config,
                move |data: &mut [i32], _: &cpal::OutputCallbackInfo| {
                    fill_frames(data, channels, &mut consumer, |s| (s as i32) << 16)
                },
                err_fn,
                None,
            ),
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_frames(data, channels, &mut consumer, i16_to_f32)
                },
                err_fn,
                None,
            ),
            other => return Err(DeviceError::UnsupportedFormat(format!("{other:?}"))),
        }
        .map_err(|e| open_error(device_id, e))?;

        stream.play().map_err(|e| open_error(device_id, e))?;
        let sample_rate = format.sample_rate;
        info!(device = device_id, channels, sample_rate, "output stream opened");

        let closed = Arc::new(AtomicBool::new(false));
        Ok(OutputStream {
            handle: Box::new(CpalHandle {
                stream,
                closed: Some(closed.clone()),
            }),
            writer: Box::new(RingWriter {
                producer,
                closed,
                fault,
            }),
        })
    }
}

/// Copy one mono sample per frame into every channel, silence on underrun.
fn fill_frames<T: Copy>(
    data: &mut [T],
    channels: usize,
    consumer: &mut Consumer<i16>,
    convert: impl Fn(i16) -> T,
) {
    for frame in data.chunks_mut(channels.max(1)) {
        let value = convert(consumer.pop().unwrap_or(0));
        for out in frame.iter_mut() {
            *out = value;
        }
    }
}

struct CpalHandle {
    stream: cpal::Stream,
    /// Set on close so a writer blocked on this device gives up
    closed: Option<Arc<AtomicBool>>,
}

impl DeviceHandle for CpalHandle {
    fn close(self: Box<Self>) -> Result<(), DeviceError> {
        if let Some(closed) = &self.closed {
            closed.store(true, Ordering::Release);
        }
        // Dropping the stream releases the device even if pause fails
        self.stream
            .pause()
            .map_err(|e| DeviceError::Close(e.to_string()))
    }
}

struct RingWriter {
    producer: Producer<i16>,
    closed: Arc<AtomicBool>,
    fault: Arc<SessionFault>,
}

impl PcmWriter for RingWriter {
    fn write(&mut self, samples: &[i16]) -> Result<(), DeviceError> {
        let mut rest = samples;
        while !rest.is_empty() {
            if self.closed.load(Ordering::Acquire) {
                return Err(DeviceError::Closed);
            }
            if self.fault.is_tripped() {
                let reason = self.fault.reason().unwrap_or_default();
                return Err(DeviceError::Write(reason));
            }

            let free = self.producer.slots();
            if free == 0 {
                thread::sleep(WRITE_BACKOFF);
                continue;
            }

            let (now, later) = rest.split_at(free.min(rest.len()));
            for &sample in now {
                // Cannot fail: `free` slots were available
                let _ = self.producer.push(sample);
            }
            rest = later;
        }
        Ok(())
    }
}
