use crate::evaluate::EvaluationResult;

/// The discrete state of one practice attempt.
///
/// Exactly one phase is active at a time, and each carries only the data
/// valid for that phase. Begin gestures are honored in Idle, Succeeded and
/// Failed; end gestures only in Recording; Processing is entered only from a
/// finished recording and left only by a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first gesture
    Idle,
    /// Push-to-talk held, microphone buffering
    Recording,
    /// Upload in flight; `generation` ties the eventual verdict to this cycle
    Processing { generation: u64 },
    /// A verdict arrived; perfect and try-again are both resettable end states
    Succeeded { result: EvaluationResult },
    /// The upload or the service failed; resettable by the next begin gesture
    Failed,
}

impl Phase {
    /// User-facing status line for this phase
    pub fn status_line(&self) -> String {
        match self {
            Phase::Idle => "Hold to speak when ready.".to_string(),
            Phase::Recording => "Recording... Speak now!".to_string(),
            Phase::Processing { .. } => "Processing...".to_string(),
            Phase::Succeeded { result } if result.is_perfect() => {
                "🎉 Perfect! You said it correctly!".to_string()
            }
            Phase::Succeeded { result } => {
                format!("❌ Try again! You said: '{}'", result.transcript)
            }
            Phase::Failed => "Error processing speech. Try again.".to_string(),
        }
    }

    /// Whether a begin gesture is honored in this phase
    pub fn accepts_begin(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Succeeded { .. } | Phase::Failed)
    }
}
