use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

use super::messages::{EvaluationResult, VerdictMessage};
use crate::audio::AudioArtifact;

/// Errors from one evaluation exchange.
///
/// Every variant collapses to the same user-facing failure at the
/// coordinator; the distinctions exist for logs and tests.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The request never completed (connection refused, reset, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {0}")]
    Status(StatusCode),

    /// The body was not the expected verdict payload
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Client for the remote evaluation service.
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EvaluationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Upload one finished recording and await the verdict.
    ///
    /// Exactly one multipart request per artifact; the artifact is consumed.
    /// No retry and no cancellation here -- the caller decides what a failure
    /// means.
    pub async fn evaluate(&self, artifact: AudioArtifact) -> Result<EvaluationResult, EvalError> {
        let byte_count = artifact.bytes.len();
        let file_name = artifact.file_name();
        let mime = artifact.mime();

        let part = reqwest::multipart::Part::bytes(artifact.bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        debug!("Uploading {} byte recording to {}", byte_count, self.endpoint);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvalError::Status(status));
        }

        // Parse from text so a non-JSON success body maps to Malformed rather
        // than a transport error.
        let body = response.text().await?;
        let verdict: VerdictMessage =
            serde_json::from_str(&body).map_err(|e| EvalError::Malformed(e.to_string()))?;

        let accuracy = u8::try_from(verdict.accuracy)
            .ok()
            .filter(|a| *a <= EvaluationResult::PERFECT)
            .ok_or_else(|| {
                EvalError::Malformed(format!("accuracy {} outside 0-100", verdict.accuracy))
            })?;

        info!(
            "Verdict received: accuracy={}, spoken='{}'",
            accuracy, verdict.spoken
        );

        Ok(EvaluationResult {
            transcript: verdict.spoken,
            accuracy,
        })
    }

    /// Service endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
