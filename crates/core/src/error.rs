//! Error taxonomy
//!
//! Two families of failure exist in this system:
//! - [`Error`]: terminal failures returned to the caller. Every variant maps
//!   to a user-facing message via [`Error::user_message`] that is distinct
//!   from the internal `Display` text used for logging.
//! - [`Degraded`]: non-fatal failure of an optional enrichment step
//!   (detection, translation, retrieval). Callers absorb these with a
//!   fallback and log a warning; a `Degraded` value never reaches the caller
//!   as an error.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Terminal errors surfaced to API callers.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied unusable input. Maps to a 4xx response.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required deployment identifier is absent from configuration.
    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// An outbound call to a managed service failed.
    #[error("{service} error: {message}")]
    Service {
        service: &'static str,
        message: String,
    },

    /// The model returned no content at all.
    #[error("model returned an empty response")]
    EmptyModelResponse,

    /// The model produced text that could not be parsed into the expected
    /// JSON object. The raw generation is carried for diagnosis.
    #[error("malformed model output: {message}")]
    MalformedModelOutput { message: String, raw: String },

    /// The transcription provider reported a failed job.
    #[error("transcription failed: {reason}")]
    TranscriptionFailed { reason: String },
}

impl Error {
    /// Build a [`Error::Service`] from any displayable provider error.
    pub fn service(service: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Service {
            service,
            message: err.to_string(),
        }
    }

    /// Whether the failure is the caller's fault (4xx) rather than ours (5xx).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// User-facing message. Internal exception detail is never echoed to the
    /// caller; the one deliberate exception is the raw model text attached to
    /// `MalformedModelOutput`, which exists for diagnosis.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg) => msg.clone(),
            Error::MissingConfiguration(_) => {
                "The service is not fully configured. Please contact support.".to_string()
            }
            Error::Service { service, .. } => {
                format!("An upstream service ({service}) is currently unavailable.")
            }
            Error::EmptyModelResponse => "The model did not return any content.".to_string(),
            Error::MalformedModelOutput { raw, .. } => {
                format!("Failed to parse the model output. Raw output: {raw}")
            }
            Error::TranscriptionFailed { reason } => {
                format!("Transcription failed: {reason}")
            }
        }
    }
}

/// Non-fatal failure of an optional enrichment step.
///
/// Detection, translation and retrieval are best-effort: the pipelines log
/// the degradation and continue with a fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degraded {
    /// Which step degraded (e.g. "language-detection", "kb-retrieval").
    pub step: &'static str,
    /// Provider-reported reason, for logs only.
    pub reason: String,
}

impl Degraded {
    pub fn new(step: &'static str, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Degraded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} degraded: {}", self.step, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = Error::service("bedrock", "ExpiredTokenException: token expired");
        assert!(!err.user_message().contains("ExpiredTokenException"));
    }

    #[test]
    fn test_malformed_output_surfaces_raw_text() {
        let err = Error::MalformedModelOutput {
            message: "no JSON object found".to_string(),
            raw: "I'm sorry, I can't do that".to_string(),
        };
        assert!(err.user_message().contains("I'm sorry, I can't do that"));
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(Error::InvalidInput("empty".into()).is_caller_error());
        assert!(!Error::EmptyModelResponse.is_caller_error());
    }
}
