//! Speech transcription seams

use async_trait::async_trait;

use crate::error::Result;
use crate::transcription::{TranscriptionJob, TranscriptionStatus};

/// Object storage for uploaded media.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload audio bytes under `key`, returning the media URI the
    /// transcription service should read from.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String>;
}

/// The asynchronous transcription service.
///
/// The provider has no push notification path; callers poll [`status`] on a
/// fixed interval until it is terminal.
///
/// [`status`]: TranscriptionBackend::status
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Submit a named transcription job.
    async fn submit(&self, job: &TranscriptionJob) -> Result<()>;

    /// Current status of a submitted job.
    async fn status(&self, job_name: &str) -> Result<TranscriptionStatus>;

    /// Fetch the transcript document of a completed job.
    ///
    /// Returned as raw JSON; the orchestrator extracts the transcript text
    /// from the provider's nested field path.
    async fn fetch_transcript(&self, transcript_uri: &str) -> Result<serde_json::Value>;
}
