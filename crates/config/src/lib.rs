//! Configuration management for the kontrak backend
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, then `config/{env}.yaml`)
//! - Environment variables (`KONTRAK_` prefix, `__` section separator)
//!
//! Deployment identifiers (model id, knowledge base id, bucket names) default
//! from the conventional environment variables so a container configured for
//! the original deployment runs unchanged.

pub mod settings;

pub use settings::{
    load_settings, AnalysisConfig, AwsConfig, ChatConfig, ClassifierConfig, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings, TranscriptionConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
