//! Specialization classifier
//!
//! Prompt-based categorical router: maps a free-form user prompt to zero or
//! more labels from the fixed [`SPECIALIZATIONS`] set. Invoked at zero
//! temperature for deterministic-leaning output. Anything unparseable is
//! treated as "no match" — the downstream behavior for an empty label set is
//! well-defined, so this is never an error.

use std::sync::Arc;

use kontrak_config::ClassifierConfig;
use kontrak_core::{GenerateRequest, GenerativeModel};

use crate::extract::first_json_array;
use crate::prompts::{classification_prompt, SPECIALIZATIONS};

/// The prompt-to-specializations classifier.
pub struct SpecializationClassifier {
    model: Arc<dyn GenerativeModel>,
    config: ClassifierConfig,
}

impl SpecializationClassifier {
    pub fn new(model: Arc<dyn GenerativeModel>, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    /// Classify a prompt into matching specialization labels.
    ///
    /// Infallible by design: model errors and unparseable output both yield
    /// the empty set.
    pub async fn classify(&self, prompt: &str) -> Vec<String> {
        let request = GenerateRequest::new(
            classification_prompt(prompt),
            self.config.max_gen_len,
            0.0,
        );

        let generation = match self.model.generate(&request).await {
            Ok(response) => response.generation,
            Err(err) => {
                tracing::warn!(error = %err, "classification invocation failed, returning no match");
                return Vec::new();
            }
        };

        Self::parse_labels(&generation)
    }

    /// Extract the first bracketed JSON array and keep only known labels.
    fn parse_labels(generation: &str) -> Vec<String> {
        let Some(span) = first_json_array(generation) else {
            return Vec::new();
        };

        let Ok(labels) = serde_json::from_str::<Vec<String>>(span) else {
            tracing::warn!("classifier output array did not parse, returning no match");
            return Vec::new();
        };

        let mut matched: Vec<String> = labels
            .into_iter()
            .filter(|label| SPECIALIZATIONS.contains(&label.as_str()))
            .collect();
        matched.dedup();
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kontrak_core::{Error, GenerateResponse, Result};

    struct CannedModel(Result<String>);

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
            // The classifier always asks for deterministic output.
            assert_eq!(request.temperature, 0.0);
            match &self.0 {
                Ok(generation) => Ok(GenerateResponse {
                    generation: generation.clone(),
                }),
                Err(_) => Err(Error::service("bedrock", "down")),
            }
        }

        fn model_id(&self) -> &str {
            "canned"
        }
    }

    fn classifier(output: Result<String>) -> SpecializationClassifier {
        SpecializationClassifier::new(Arc::new(CannedModel(output)), ClassifierConfig::default())
    }

    #[tokio::test]
    async fn test_labels_extracted_from_prose() {
        let classifier = classifier(Ok(
            r#"Based on the request, the labels are ["Employment Law", "Dispute Resolution"]."#
                .to_string(),
        ));
        let labels = classifier.classify("I was dismissed unfairly").await;
        assert_eq!(labels, vec!["Employment Law", "Dispute Resolution"]);
    }

    #[tokio::test]
    async fn test_unknown_labels_dropped() {
        let classifier =
            classifier(Ok(r#"["Employment Law", "Maritime Law"]"#.to_string()));
        let labels = classifier.classify("prompt").await;
        assert_eq!(labels, vec!["Employment Law"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let classifier = classifier(Ok("[]".to_string()));
        assert!(classifier.classify("what is the weather").await.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_output_is_empty() {
        let classifier = classifier(Ok("I think employment law fits best.".to_string()));
        assert!(classifier.classify("prompt").await.is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_empty() {
        let classifier = classifier(Err(Error::service("bedrock", "down")));
        assert!(classifier.classify("prompt").await.is_empty());
    }
}
