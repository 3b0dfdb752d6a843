use thiserror::Error;

use super::artifact::AudioArtifact;

/// Capture format finished recordings are normalized to
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Target sample rate in Hz (decimated from the device rate when possible)
    pub target_sample_rate: u32,
    /// Target channel count (1 = mono)
    pub target_channels: u16,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 16000, // 16kHz is what the recognizer consumes
            target_channels: 1,        // Mono
        }
    }
}

/// Errors raised by the microphone session
#[derive(Debug, Error)]
pub enum MicError {
    /// The platform refused access to the capture device
    #[error("microphone permission denied")]
    PermissionDenied,

    /// No usable input device exists (or it disappeared)
    #[error("no usable audio input device")]
    DeviceUnavailable,

    /// Capture cannot start right now (a recording is already active)
    #[error("capture is not ready")]
    NotReady,

    /// Stop was called with no recording in progress
    #[error("no active recording to stop")]
    NoActiveRecording,

    /// The underlying audio stream failed
    #[error("audio stream error: {0}")]
    Stream(String),

    /// Finalizing the recording into a WAV container failed
    #[error("failed to encode recording: {0}")]
    Encode(#[from] hound::Error),
}

/// Capture seam the session coordinator drives.
///
/// The production implementation is
/// [`CpalMicrophone`](super::microphone::CpalMicrophone); tests substitute a
/// scripted recorder.
pub trait Recorder {
    /// Begin buffering incoming audio
    fn start(&mut self) -> Result<(), MicError>;

    /// End buffering and finalize the recording into an artifact.
    ///
    /// A finished recording cannot be stopped twice.
    fn stop(&mut self) -> Result<AudioArtifact, MicError>;

    /// Whether a recording is currently active
    fn is_recording(&self) -> bool;

    /// Recorder name for logging
    fn name(&self) -> &str;
}

/// Mix interleaved samples down to mono by summing channels.
///
/// Returns the samples and the resulting channel count; input with one (or
/// zero) channels passes through untouched.
pub fn mix_to_mono(samples: Vec<i16>, channels: u16) -> (Vec<i16>, u16) {
    if channels <= 1 {
        return (samples, channels);
    }

    let step = channels as usize;
    let mut mono = Vec::with_capacity(samples.len() / step);

    // Sum the channels (no division to preserve volume)
    for frame in samples.chunks_exact(step) {
        let sum: i32 = frame.iter().map(|&s| s as i32).sum();
        mono.push(sum.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
    }

    (mono, 1)
}

/// Downsample by decimation, taking every Nth sample.
///
/// Returns the samples and the effective sample rate. Decimation only happens
/// when the target rate evenly divides the source rate; otherwise the input
/// passes through at its original rate (no upsampling, no interpolation).
pub fn decimate(samples: Vec<i16>, source_rate: u32, target_rate: u32) -> (Vec<i16>, u32) {
    if target_rate == 0 || source_rate <= target_rate || source_rate % target_rate != 0 {
        return (samples, source_rate);
    }

    let ratio = (source_rate / target_rate) as usize;
    let decimated: Vec<i16> = samples.iter().step_by(ratio).copied().collect();

    (decimated, target_rate)
}
