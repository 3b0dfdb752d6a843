use chrono::Utc;
use tracing::{debug, info, warn};

use super::phase::Phase;
use super::stats::{AttemptRecord, SessionStats};
use crate::audio::{AudioArtifact, Recorder};
use crate::evaluate::{EvalError, EvaluationResult};

/// An artifact handed to the driver for upload, stamped with the processing
/// generation it belongs to.
#[derive(Debug)]
pub struct Upload {
    pub artifact: AudioArtifact,
    pub generation: u64,
}

/// Drives the record / upload / verdict state machine for one practice
/// session.
///
/// Gestures arrive through [`begin`](Self::begin) and
/// [`finish`](Self::finish); the driver ships the returned [`Upload`] and
/// reports back through [`apply`](Self::apply). The generation stamp makes
/// verdicts for superseded or torn-down cycles inert.
pub struct PracticeSession<R> {
    session_id: String,
    word: String,
    mic: Option<R>,
    phase: Phase,
    generation: u64,
    last_accuracy: Option<u8>,
    attempts: Vec<AttemptRecord>,
    started_at: chrono::DateTime<chrono::Utc>,
    /// Transient advisory shown instead of the phase status (e.g. a refused
    /// begin gesture); cleared on the next successful transition.
    advisory: Option<String>,
}

impl<R: Recorder> PracticeSession<R> {
    /// Create a session for one target word.
    ///
    /// `mic` is `None` when acquisition failed; every begin gesture is then
    /// answered with an advisory and recording stays unavailable for the
    /// session lifetime.
    pub fn new(word: impl Into<String>, mic: Option<R>) -> Self {
        let word = word.into();
        let session_id = format!("practice-{}", uuid::Uuid::new_v4());

        match &mic {
            Some(mic) => info!("Created session {} for '{}' on '{}'", session_id, word, mic.name()),
            None => warn!(
                "Created session {} for '{}' without a microphone",
                session_id, word
            ),
        }

        Self {
            session_id,
            word,
            mic,
            phase: Phase::Idle,
            generation: 0,
            last_accuracy: None,
            attempts: Vec::new(),
            started_at: Utc::now(),
            advisory: None,
        }
    }

    /// Begin gesture: Idle / Succeeded / Failed -> Recording.
    ///
    /// Refused (with an advisory, never a crash) while Processing, while
    /// already Recording, or when no microphone handle exists.
    pub fn begin(&mut self) {
        if !self.phase.accepts_begin() {
            if matches!(self.phase, Phase::Processing { .. }) {
                self.advisory = Some("Still processing your last attempt...".to_string());
            }
            debug!("Begin gesture refused in {:?}", self.phase);
            return;
        }

        let Some(mic) = self.mic.as_mut() else {
            warn!("Begin gesture with no microphone available");
            self.advisory = Some("Recording is unavailable (no microphone access).".to_string());
            return;
        };

        match mic.start() {
            Ok(()) => {
                self.advisory = None;
                self.phase = Phase::Recording;
                info!("Recording started");
            }
            Err(e) => {
                warn!("Could not start capture: {}", e);
                self.advisory = Some("Could not start recording. Try again.".to_string());
            }
        }
    }

    /// End gesture: Recording -> Processing.
    ///
    /// Returns the finished artifact stamped with the new generation; the
    /// caller must ship it and eventually call [`apply`](Self::apply). End
    /// gestures outside Recording are ignored.
    pub fn finish(&mut self) -> Option<Upload> {
        if self.phase != Phase::Recording {
            debug!("End gesture outside Recording ignored");
            return None;
        }

        // Recording phase implies the handle exists.
        let mic = self.mic.as_mut()?;

        match mic.stop() {
            Ok(artifact) => {
                self.generation += 1;
                self.advisory = None;
                self.phase = Phase::Processing {
                    generation: self.generation,
                };
                info!(
                    "Recording finished ({:.1}s), awaiting evaluation",
                    artifact.duration_secs()
                );
                Some(Upload {
                    artifact,
                    generation: self.generation,
                })
            }
            Err(e) => {
                warn!("Failed to finalize recording: {}", e);
                self.advisory = None;
                self.phase = Phase::Failed;
                None
            }
        }
    }

    /// Apply the verdict for the upload stamped `generation`.
    ///
    /// A verdict whose generation does not match the in-flight cycle is stale
    /// (the session moved on or was torn down) and mutates nothing.
    pub fn apply(&mut self, generation: u64, outcome: Result<EvaluationResult, EvalError>) {
        let in_flight =
            matches!(self.phase, Phase::Processing { generation: g } if g == generation);
        if !in_flight {
            debug!("Discarding stale verdict for generation {}", generation);
            return;
        }

        self.advisory = None;

        match outcome {
            Ok(result) => {
                self.last_accuracy = Some(result.accuracy);
                self.attempts.push(AttemptRecord {
                    word: self.word.clone(),
                    transcript: result.transcript.clone(),
                    accuracy: result.accuracy,
                    passed: result.is_perfect(),
                    at: Utc::now(),
                });
                info!(
                    "Attempt graded: accuracy={} ('{}')",
                    result.accuracy, result.transcript
                );
                self.phase = Phase::Succeeded { result };
            }
            Err(e) => {
                warn!("Evaluation failed: {}", e);
                self.phase = Phase::Failed;
            }
        }
    }

    /// Tear the session down.
    ///
    /// Releases the capture resource (dropping the handle stops any live
    /// recording) and bumps the generation so an in-flight verdict, if one
    /// ever arrives, is discarded.
    pub fn teardown(&mut self) {
        self.generation += 1;
        if let Some(mic) = &self.mic {
            if mic.is_recording() {
                warn!("Tearing down with an active recording; capture is discarded");
            }
        }
        self.mic = None;
        self.phase = Phase::Idle;
        self.advisory = None;
        info!("Session {} torn down", self.session_id);
    }

    /// User-facing status line: the transient advisory if one is pending,
    /// otherwise the current phase's line.
    pub fn status(&self) -> String {
        match &self.advisory {
            Some(advisory) => advisory.clone(),
            None => self.phase.status_line(),
        }
    }

    /// Summary of the session so far
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            started_at: self.started_at,
            attempts: self.attempts.len(),
            passed: self.attempts.iter().filter(|a| a.passed).count(),
            best_accuracy: self.attempts.iter().map(|a| a.accuracy).max(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Accuracy of the most recent graded attempt; survives Failed cycles
    pub fn last_accuracy(&self) -> Option<u8> {
        self.last_accuracy
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
