//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// AWS deployment identifiers
    #[serde(default)]
    pub aws: AwsConfig,

    /// Contract analysis pipeline tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Legal-advice chat pipeline tuning
    #[serde(default)]
    pub chat: ChatConfig,

    /// Specialization classifier tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Transcription orchestration tuning
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty list falls back to localhost.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: Vec::new(),
            cors_enabled: default_true(),
        }
    }
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000)
}

fn default_true() -> bool {
    true
}

/// AWS deployment identifiers.
///
/// Each identifier defaults from the conventional environment variable used
/// by the original deployment, so `KONTRAK_`-prefixed overrides are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,

    /// Generative model id for invoke-model calls.
    #[serde(default = "env_model_id")]
    pub model_id: Option<String>,

    /// Model ARN used by retrieve-and-generate.
    #[serde(default = "env_model_arn")]
    pub model_arn: Option<String>,

    /// Knowledge base id for retrieval.
    #[serde(default = "env_knowledge_base_id")]
    pub knowledge_base_id: Option<String>,

    /// Bucket holding uploaded audio and transcription output.
    #[serde(default = "env_s3_bucket")]
    pub s3_bucket: Option<String>,

    /// DynamoDB table of legal experts.
    #[serde(default = "default_experts_table")]
    pub experts_table: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            model_id: env_model_id(),
            model_arn: env_model_arn(),
            knowledge_base_id: env_knowledge_base_id(),
            s3_bucket: env_s3_bucket(),
            experts_table: default_experts_table(),
        }
    }
}

fn default_region() -> String {
    std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string())
}

fn env_model_id() -> Option<String> {
    std::env::var("MODEL_ID").ok().filter(|s| !s.is_empty())
}

fn env_model_arn() -> Option<String> {
    std::env::var("MODEL_ARN").ok().filter(|s| !s.is_empty())
}

fn env_knowledge_base_id() -> Option<String> {
    std::env::var("KNOWLEDGE_BASE_ID")
        .ok()
        .filter(|s| !s.is_empty())
}

fn env_s3_bucket() -> Option<String> {
    std::env::var("AWS_S3_BUCKET_NAME")
        .ok()
        .filter(|s| !s.is_empty())
}

fn default_experts_table() -> String {
    std::env::var("EXPERTS_DYNAMODB_TABLE").unwrap_or_else(|_| "experts".to_string())
}

/// Contract analysis pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Generation budget for the structured analysis. The clause list for a
    /// long contract is large, so this is much higher than the chat budget.
    #[serde(default = "default_analysis_max_gen_len")]
    pub max_gen_len: u32,

    #[serde(default = "default_analysis_temperature")]
    pub temperature: f32,

    /// Passages requested from the knowledge base to ground the analysis.
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_gen_len: default_analysis_max_gen_len(),
            temperature: default_analysis_temperature(),
            retrieval_top_k: default_retrieval_top_k(),
        }
    }
}

fn default_analysis_max_gen_len() -> u32 {
    8192
}

fn default_analysis_temperature() -> f32 {
    0.1
}

fn default_retrieval_top_k() -> usize {
    20
}

/// Legal-advice chat pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_max_gen_len")]
    pub max_gen_len: u32,

    #[serde(default = "default_chat_temperature")]
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_gen_len: default_chat_max_gen_len(),
            temperature: default_chat_temperature(),
        }
    }
}

fn default_chat_max_gen_len() -> u32 {
    2048
}

fn default_chat_temperature() -> f32 {
    0.2
}

/// Specialization classifier tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_max_gen_len")]
    pub max_gen_len: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_gen_len: default_classifier_max_gen_len(),
        }
    }
}

fn default_classifier_max_gen_len() -> u32 {
    256
}

/// Transcription orchestration tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Seconds between job status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_media_format")]
    pub media_format: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            media_format: default_media_format(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_media_format() -> String {
    "wav".to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.analysis.temperature),
            });
        }

        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "chat.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.chat.temperature),
            });
        }

        if self.analysis.retrieval_top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.retrieval_top_k".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if self.transcription.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transcription.poll_interval_secs".to_string(),
                message: "Must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && self.aws.model_id.is_none() {
            return Err(ConfigError::MissingField("aws.model_id".to_string()));
        }

        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > config/{env}.yaml > config/default.yaml > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = Path::new("config/default.yaml");
    if default_path.exists() {
        builder = builder.add_source(File::from(default_path));
    }

    if let Some(env_name) = env {
        let env_path = format!("config/{env_name}.yaml");
        if Path::new(&env_path).exists() {
            builder = builder.add_source(File::with_name(&env_path));
        } else {
            return Err(ConfigError::FileNotFound(env_path));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("KONTRAK")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
