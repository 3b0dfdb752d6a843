use std::path::PathBuf;

use crate::audio::CaptureConfig;

/// Settings for one practice session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target word the user is asked to pronounce
    pub word: String,

    /// Evaluation service endpoint
    pub endpoint: String,

    /// Capture format recordings are normalized to
    pub capture: CaptureConfig,

    /// Keep a WAV copy of each attempt here, when set
    pub recordings_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            word: "water bottle".to_string(),
            endpoint: "http://127.0.0.1:5000/evaluate".to_string(),
            capture: CaptureConfig::default(),
            recordings_dir: None,
        }
    }
}
