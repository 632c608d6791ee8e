//! AWS SDK implementations of the kontrak service seams
//!
//! Each managed service gets a thin client wrapper implementing the matching
//! `kontrak-core` trait. All SDK clients are constructed once at process boot
//! from a shared [`AwsClients`] bundle and injected into the pipelines; there
//! are no module-level singletons.
//!
//! Deployment identifiers (model id, knowledge base id, bucket) may be absent
//! in a partially configured environment. The wrappers hold them as `Option`
//! and surface `Error::MissingConfiguration` at call time, so the server
//! still boots and unrelated endpoints keep working.

pub mod bedrock;
pub mod comprehend;
pub mod experts;
pub mod knowledge;
pub mod transcribe;
pub mod translate;

pub use bedrock::{BedrockModel, BedrockModelConfig};
pub use comprehend::ComprehendDetector;
pub use experts::DynamoDbExpertDirectory;
pub use knowledge::{BedrockKnowledgeBase, BedrockKnowledgeBaseConfig};
pub use transcribe::{S3MediaStore, TranscribeBackend};
pub use translate::AwsTranslator;

use aws_config::{BehaviorVersion, Region};

/// One SDK client per managed service, built from a single shared config.
#[derive(Clone)]
pub struct AwsClients {
    pub bedrock: aws_sdk_bedrockruntime::Client,
    pub bedrock_agent: aws_sdk_bedrockagentruntime::Client,
    pub comprehend: aws_sdk_comprehend::Client,
    pub translate: aws_sdk_translate::Client,
    pub transcribe: aws_sdk_transcribe::Client,
    pub s3: aws_sdk_s3::Client,
    pub dynamodb: aws_sdk_dynamodb::Client,
}

impl AwsClients {
    /// Resolve credentials from the environment and build every client.
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        tracing::info!(region = %region, "Initialized AWS SDK clients");

        Self {
            bedrock: aws_sdk_bedrockruntime::Client::new(&sdk_config),
            bedrock_agent: aws_sdk_bedrockagentruntime::Client::new(&sdk_config),
            comprehend: aws_sdk_comprehend::Client::new(&sdk_config),
            translate: aws_sdk_translate::Client::new(&sdk_config),
            transcribe: aws_sdk_transcribe::Client::new(&sdk_config),
            s3: aws_sdk_s3::Client::new(&sdk_config),
            dynamodb: aws_sdk_dynamodb::Client::new(&sdk_config),
        }
    }
}
