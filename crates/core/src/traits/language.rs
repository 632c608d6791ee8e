//! Language detection and translation seams
//!
//! Both services are best-effort enrichments: every method returns
//! `Result<_, Degraded>` and callers fall back rather than fail.

use async_trait::async_trait;

use crate::error::Degraded;
use crate::language::{Language, LanguagePrediction};

/// A hosted dominant-language detection service.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text`, ranked by confidence. Callers use the
    /// top entry only.
    async fn detect(&self, text: &str) -> Result<Vec<LanguagePrediction>, Degraded>;
}

/// A hosted machine-translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`.
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<String, Degraded>;
}
