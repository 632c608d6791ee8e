//! S3 media store and Transcribe job client
//!
//! The orchestration (poll loop, transcript-shape handling) lives in the
//! pipeline crate; this module only wraps the provider calls.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_transcribe::types::{
    LanguageCode, Media, MediaFormat, TranscriptionJobStatus as SdkJobStatus,
};

use kontrak_core::{
    Error, MediaStore, Result, TranscriptionBackend, TranscriptionJob, TranscriptionStatus,
};

/// Audio object storage backed by S3.
#[derive(Clone)]
pub struct S3MediaStore {
    client: aws_sdk_s3::Client,
    bucket: Option<String>,
}

impl S3MediaStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: Option<String>) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .ok_or(Error::MissingConfiguration("AWS_S3_BUCKET_NAME"))
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        let bucket = self.bucket()?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| Error::service("s3", e))?;

        Ok(format!("s3://{bucket}/{key}"))
    }
}

/// Transcription jobs backed by the Transcribe service.
///
/// The completed transcript is a JSON document at a provider-hosted URI, so
/// fetching it is a plain HTTP GET rather than an SDK call.
#[derive(Clone)]
pub struct TranscribeBackend {
    client: aws_sdk_transcribe::Client,
    http: reqwest::Client,
    output_bucket: Option<String>,
}

impl TranscribeBackend {
    pub fn new(client: aws_sdk_transcribe::Client, output_bucket: Option<String>) -> Self {
        Self {
            client,
            http: reqwest::Client::new(),
            output_bucket,
        }
    }
}

#[async_trait]
impl TranscriptionBackend for TranscribeBackend {
    async fn submit(&self, job: &TranscriptionJob) -> Result<()> {
        let output_bucket = self
            .output_bucket
            .as_deref()
            .ok_or(Error::MissingConfiguration("AWS_S3_BUCKET_NAME"))?;

        self.client
            .start_transcription_job()
            .transcription_job_name(&job.name)
            .media(Media::builder().media_file_uri(&job.media_uri).build())
            .media_format(MediaFormat::from(job.media_format.as_str()))
            .language_code(LanguageCode::from(job.language_code.as_str()))
            .output_bucket_name(output_bucket)
            .send()
            .await
            .map_err(|e| Error::service("transcribe", e))?;

        Ok(())
    }

    async fn status(&self, job_name: &str) -> Result<TranscriptionStatus> {
        let output = self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| Error::service("transcribe", e))?;

        let job = output
            .transcription_job()
            .ok_or_else(|| Error::service("transcribe", "job not found in response"))?;

        let status = match job.transcription_job_status() {
            Some(SdkJobStatus::Completed) => {
                let transcript_uri = job
                    .transcript()
                    .and_then(|t| t.transcript_file_uri())
                    .ok_or_else(|| {
                        Error::service("transcribe", "completed job has no transcript uri")
                    })?
                    .to_string();
                TranscriptionStatus::Completed { transcript_uri }
            }
            Some(SdkJobStatus::Failed) => TranscriptionStatus::Failed {
                reason: job
                    .failure_reason()
                    .unwrap_or("no failure reason reported")
                    .to_string(),
            },
            _ => TranscriptionStatus::InProgress,
        };

        Ok(status)
    }

    async fn fetch_transcript(&self, transcript_uri: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(transcript_uri)
            .send()
            .await
            .map_err(|e| Error::service("transcribe", e))?;

        response
            .json()
            .await
            .map_err(|e| Error::service("transcribe", e))
    }
}
