use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One graded attempt at the target word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Word the user was asked to pronounce
    pub word: String,

    /// What the recognizer heard
    pub transcript: String,

    /// Accuracy score returned by the service (0-100)
    pub accuracy: u8,

    /// Whether the attempt was graded a perfect match
    pub passed: bool,

    /// When the verdict arrived
    pub at: DateTime<Utc>,
}

/// Summary of a practice session so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total graded attempts
    pub attempts: usize,

    /// Attempts graded a perfect match
    pub passed: usize,

    /// Best accuracy seen, if any attempt was graded
    pub best_accuracy: Option<u8>,
}
