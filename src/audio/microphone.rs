//! cpal-backed microphone session.
//!
//! The input device is acquired once per process lifetime. Each push-to-talk
//! cycle builds a fresh input stream that appends normalized i16 samples to a
//! shared buffer; stopping tears the stream down and finalizes the buffer
//! into a WAV artifact.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, StreamConfig};
use tracing::{error, info, warn};

use super::artifact::AudioArtifact;
use super::capture::{decimate, mix_to_mono, CaptureConfig, MicError, Recorder};

/// Exclusive handle on one live audio input device.
///
/// Acquired once at session start, never reacquired. If acquisition fails the
/// coordinator runs without a handle and recording stays unavailable for the
/// rest of the session.
pub struct CpalMicrophone {
    device: Device,
    device_name: String,
    stream_config: StreamConfig,
    sample_format: SampleFormat,
    capture: CaptureConfig,
    recording: Option<ActiveRecording>,
}

/// A recording in progress: the live input stream plus its accumulating
/// buffer. Dropping this mid-recording stops capture and discards the buffer.
struct ActiveRecording {
    stream: cpal::Stream,
    buffer: Arc<Mutex<Vec<i16>>>,
}

impl CpalMicrophone {
    /// Request the default input device and its native stream config.
    ///
    /// The probe can block on the platform audio backend (and on some
    /// platforms triggers the OS permission prompt), so it runs on the
    /// blocking pool. Failure is terminal for the session; no retry is
    /// attempted.
    pub async fn acquire(capture: CaptureConfig) -> Result<Self, MicError> {
        let (device, supported) = tokio::task::spawn_blocking(probe_default_input)
            .await
            .map_err(|e| MicError::Stream(e.to_string()))??;

        let device_name = device.name().unwrap_or_else(|_| "unknown input".to_string());

        info!(
            "Acquired input device '{}' ({}Hz, {} channels, {:?})",
            device_name,
            supported.sample_rate().0,
            supported.channels(),
            supported.sample_format()
        );

        Ok(Self {
            device,
            device_name,
            stream_config: supported.config(),
            sample_format: supported.sample_format(),
            capture,
            recording: None,
        })
    }

    fn build_stream<T>(&self, buffer: Arc<Mutex<Vec<i16>>>) -> Result<cpal::Stream, MicError>
    where
        T: cpal::Sample + cpal::SizedSample + Send + 'static,
        f32: cpal::FromSample<T>,
    {
        self.device
            .build_input_stream(
                &self.stream_config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    // Capture callback is the only writer; stop() reads once.
                    if let Ok(mut buffer) = buffer.lock() {
                        buffer.extend(data.iter().map(|&sample| {
                            let normalized: f32 = cpal::Sample::from_sample(sample);
                            (normalized * i16::MAX as f32) as i16
                        }));
                    }
                },
                |err| error!("Microphone stream error: {}", err),
                None,
            )
            .map_err(|e| match e {
                cpal::BuildStreamError::DeviceNotAvailable => MicError::DeviceUnavailable,
                other => MicError::Stream(other.to_string()),
            })
    }
}

impl Recorder for CpalMicrophone {
    fn start(&mut self) -> Result<(), MicError> {
        if self.recording.is_some() {
            return Err(MicError::NotReady);
        }

        let buffer = Arc::new(Mutex::new(Vec::new()));

        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(Arc::clone(&buffer)),
            SampleFormat::I16 => self.build_stream::<i16>(Arc::clone(&buffer)),
            SampleFormat::U16 => self.build_stream::<u16>(Arc::clone(&buffer)),
            other => {
                warn!("Unsupported input sample format {:?}", other);
                return Err(MicError::DeviceUnavailable);
            }
        }?;

        stream.play().map_err(|e| MicError::Stream(e.to_string()))?;

        info!("Microphone capture started ('{}')", self.device_name);
        self.recording = Some(ActiveRecording { stream, buffer });

        Ok(())
    }

    fn stop(&mut self) -> Result<AudioArtifact, MicError> {
        let ActiveRecording { stream, buffer } =
            self.recording.take().ok_or(MicError::NoActiveRecording)?;

        // Stop capture before reading the buffer so no samples arrive after
        // the recording is finalized.
        drop(stream);

        let samples = {
            let mut buffer = buffer
                .lock()
                .map_err(|_| MicError::Stream("capture buffer poisoned".to_string()))?;
            std::mem::take(&mut *buffer)
        };

        let captured_rate = self.stream_config.sample_rate.0;
        let captured_channels = self.stream_config.channels;

        let (samples, channels) = if self.capture.target_channels == 1 {
            mix_to_mono(samples, captured_channels)
        } else {
            (samples, captured_channels)
        };
        let (samples, sample_rate) = decimate(samples, captured_rate, self.capture.target_sample_rate);

        let artifact = AudioArtifact::from_samples(&samples, sample_rate, channels)?;

        info!(
            "Microphone capture stopped ({:.1}s at {}Hz)",
            artifact.duration_secs(),
            sample_rate
        );

        Ok(artifact)
    }

    fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    fn name(&self) -> &str {
        &self.device_name
    }
}

fn probe_default_input() -> Result<(Device, cpal::SupportedStreamConfig), MicError> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or(MicError::DeviceUnavailable)?;

    let supported = device.default_input_config().map_err(|e| match e {
        cpal::DefaultStreamConfigError::DeviceNotAvailable
        | cpal::DefaultStreamConfigError::StreamTypeNotSupported => MicError::DeviceUnavailable,
        cpal::DefaultStreamConfigError::BackendSpecific { err } => {
            warn!("Input device refused: {}", err);
            MicError::PermissionDenied
        }
    })?;

    Ok((device, supported))
}
