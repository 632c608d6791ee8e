//! Bedrock runtime generative model client
//!
//! Invokes the hosted model with the `{prompt, max_gen_len, temperature}`
//! payload and reads the `{generation}` response body.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::Serialize;

use kontrak_core::{Error, GenerateRequest, GenerateResponse, GenerativeModel, Result};

/// Configuration for the Bedrock model client.
#[derive(Debug, Clone, Default)]
pub struct BedrockModelConfig {
    /// Model id for invoke-model calls. Absent in a partially configured
    /// deployment; surfaced as `MissingConfiguration` at call time.
    pub model_id: Option<String>,
}

/// Generative model backed by the Bedrock runtime.
#[derive(Clone)]
pub struct BedrockModel {
    client: aws_sdk_bedrockruntime::Client,
    config: BedrockModelConfig,
}

impl BedrockModel {
    pub fn new(client: aws_sdk_bedrockruntime::Client, config: BedrockModelConfig) -> Self {
        Self { client, config }
    }

    fn require_model_id(&self) -> Result<&str> {
        self.config
            .model_id
            .as_deref()
            .ok_or(Error::MissingConfiguration("MODEL_ID"))
    }
}

#[async_trait]
impl GenerativeModel for BedrockModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let model_id = self.require_model_id()?;

        let payload = InvokePayload {
            prompt: &request.prompt,
            max_gen_len: request.max_gen_len,
            temperature: request.temperature,
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|e| Error::service("bedrock", e))?;

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| Error::service("bedrock", e))?;

        let response: GenerateResponse = serde_json::from_slice(output.body().as_ref())
            .map_err(|e| Error::service("bedrock", format!("invalid response body: {e}")))?;

        Ok(response)
    }

    fn model_id(&self) -> &str {
        self.config.model_id.as_deref().unwrap_or("unconfigured")
    }
}

/// Invoke-model request body (Llama-family text completion shape).
#[derive(Serialize)]
struct InvokePayload<'a> {
    prompt: &'a str,
    max_gen_len: u32,
    temperature: f32,
}
