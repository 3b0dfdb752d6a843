pub mod artifact;
pub mod capture;
pub mod microphone;

pub use artifact::AudioArtifact;
pub use capture::{decimate, mix_to_mono, CaptureConfig, MicError, Recorder};
pub use microphone::CpalMicrophone;
