use std::io::Cursor;
use std::path::Path;

use super::capture::MicError;

/// A finalized, encoded recording ready for upload.
///
/// Produced exactly once per completed recording; the upload step consumes it
/// by value, so an artifact cannot be shipped twice.
#[derive(Debug)]
pub struct AudioArtifact {
    /// Encoded WAV bytes (16-bit integer PCM)
    pub bytes: Vec<u8>,
    /// Sample rate of the encoded audio
    pub sample_rate: u32,
    /// Channel count of the encoded audio
    pub channels: u16,
    /// Number of samples encoded (all channels)
    pub sample_count: usize,
}

impl AudioArtifact {
    /// Encode 16-bit PCM samples into an in-memory WAV container
    pub fn from_samples(samples: &[i16], sample_rate: u32, channels: u16) -> Result<Self, MicError> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &sample in samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }

        Ok(Self {
            bytes: cursor.into_inner(),
            sample_rate,
            channels,
            sample_count: samples.len(),
        })
    }

    /// MIME type of the encoded container
    pub fn mime(&self) -> &'static str {
        "audio/wav"
    }

    /// Filename the upload form carries
    pub fn file_name(&self) -> &'static str {
        "audio.wav"
    }

    /// Duration of the encoded audio in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.sample_count as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Write a copy of the encoded recording to `path`.
    ///
    /// Debugging aid for keeping attempts on disk; the artifact itself stays
    /// untouched and is still consumed by the upload.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}
