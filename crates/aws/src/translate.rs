//! Translate client

use async_trait::async_trait;

use kontrak_core::{Degraded, Language, Translator};

/// Machine translation backed by the hosted translate service.
#[derive(Clone)]
pub struct AwsTranslator {
    client: aws_sdk_translate::Client,
}

impl AwsTranslator {
    pub fn new(client: aws_sdk_translate::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<String, Degraded> {
        let output = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(source.code())
            .target_language_code(target.code())
            .send()
            .await
            .map_err(|e| Degraded::new("translation", e.to_string()))?;

        Ok(output.translated_text().to_string())
    }
}
