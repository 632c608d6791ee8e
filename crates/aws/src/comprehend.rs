//! Comprehend dominant-language detection client

use async_trait::async_trait;

use kontrak_core::{Degraded, LanguageDetector, LanguagePrediction};

/// Language detector backed by Comprehend.
#[derive(Clone)]
pub struct ComprehendDetector {
    client: aws_sdk_comprehend::Client,
}

impl ComprehendDetector {
    pub fn new(client: aws_sdk_comprehend::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LanguageDetector for ComprehendDetector {
    async fn detect(&self, text: &str) -> Result<Vec<LanguagePrediction>, Degraded> {
        let output = self
            .client
            .detect_dominant_language()
            .text(text)
            .send()
            .await
            .map_err(|e| Degraded::new("language-detection", e.to_string()))?;

        let predictions: Vec<LanguagePrediction> = output
            .languages()
            .iter()
            .filter_map(|lang| {
                Some(LanguagePrediction {
                    code: lang.language_code()?.to_string(),
                    score: lang.score().unwrap_or(0.0),
                })
            })
            .collect();

        if predictions.is_empty() {
            return Err(Degraded::new(
                "language-detection",
                "detector returned no predictions",
            ));
        }

        Ok(predictions)
    }
}
