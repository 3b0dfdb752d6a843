pub mod audio;
pub mod config;
pub mod evaluate;
pub mod session;

pub use audio::{AudioArtifact, CaptureConfig, CpalMicrophone, MicError, Recorder};
pub use config::Config;
pub use evaluate::{EvalError, EvaluationClient, EvaluationResult};
pub use session::{AttemptRecord, Phase, PracticeSession, SessionConfig, SessionStats, Upload};
