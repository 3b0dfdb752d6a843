use serde::{Deserialize, Serialize};

/// Raw verdict payload returned by the evaluation service.
///
/// Unknown fields are ignored; missing or mistyped fields make the whole
/// response malformed.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerdictMessage {
    /// Recognition accuracy, expected in 0-100
    pub accuracy: i64,
    /// What the recognizer heard
    pub spoken: String,
}

/// A validated evaluation verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// What the recognizer heard
    pub transcript: String,
    /// Recognition accuracy, 0-100
    pub accuracy: u8,
}

impl EvaluationResult {
    /// Score the service returns for an exact match
    pub const PERFECT: u8 = 100;

    /// Whether the attempt matched the target word exactly
    pub fn is_perfect(&self) -> bool {
        self.accuracy == Self::PERFECT
    }
}
