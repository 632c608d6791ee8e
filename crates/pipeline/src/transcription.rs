//! Transcription orchestration
//!
//! Drives an asynchronous speech-to-text job to completion: upload the audio
//! to object storage, submit a named job, poll on a fixed interval until the
//! status is terminal, then fetch and unpack the transcript document.
//!
//! A `FAILED` job is a terminal error carrying the provider's reason. A
//! `COMPLETED` job whose transcript document does not have the expected shape
//! returns a fixed polite fallback string instead — this endpoint is
//! conversational, so shape drift is degraded rather than surfaced.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use kontrak_config::TranscriptionConfig;
use kontrak_core::{
    Error, MediaStore, Result, TranscriptionBackend, TranscriptionJob, TranscriptionStatus,
};

/// Fixed reply when a completed job's transcript cannot be read.
const TRANSCRIPT_FALLBACK: &str =
    "Sorry, I could not read the transcription result. Please try again.";

pub struct TranscriptionPipeline {
    media: Arc<dyn MediaStore>,
    backend: Arc<dyn TranscriptionBackend>,
    config: TranscriptionConfig,
}

impl TranscriptionPipeline {
    pub fn new(
        media: Arc<dyn MediaStore>,
        backend: Arc<dyn TranscriptionBackend>,
        config: TranscriptionConfig,
    ) -> Self {
        Self {
            media,
            backend,
            config,
        }
    }

    /// Transcribe audio bytes, blocking the request until the job finishes.
    pub async fn transcribe(&self, audio: Vec<u8>, language_code: &str) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::InvalidInput("no audio provided".to_string()));
        }

        let job_name = format!("transcription-job-{}", Uuid::new_v4());
        let key = format!("{job_name}.{}", self.config.media_format);

        let media_uri = self.media.upload(&key, audio).await?;
        tracing::info!(job = %job_name, uri = %media_uri, "submitting transcription job");

        let job = TranscriptionJob {
            name: job_name.clone(),
            media_uri,
            media_format: self.config.media_format.clone(),
            language_code: language_code.to_string(),
        };
        self.backend.submit(&job).await?;

        let poll_interval = Duration::from_secs(self.config.poll_interval_secs);
        loop {
            match self.backend.status(&job_name).await? {
                TranscriptionStatus::InProgress => {
                    tokio::time::sleep(poll_interval).await;
                }
                TranscriptionStatus::Completed { transcript_uri } => {
                    let document = self.backend.fetch_transcript(&transcript_uri).await?;
                    return Ok(extract_transcript_text(&document)
                        .unwrap_or_else(|| TRANSCRIPT_FALLBACK.to_string()));
                }
                TranscriptionStatus::Failed { reason } => {
                    return Err(Error::TranscriptionFailed { reason });
                }
            }
        }
    }
}

/// The provider's well-known nested field path for the transcript text.
fn extract_transcript_text(document: &serde_json::Value) -> Option<String> {
    document
        .get("results")?
        .get("transcripts")?
        .get(0)?
        .get("transcript")?
        .as_str()
        .map(|s| s.to_string())
}
