//! Language-aware query normalization
//!
//! Detects the input language and, when it is Malay (or Indonesian, which is
//! folded into Malay), translates to English before any model or retrieval
//! call. The detected direction is captured in a [`TranslationPlan`] so the
//! back-translation decision at the end of the request uses the *original*
//! detection, not a re-derivation.
//!
//! Both steps are best-effort: detection failure defaults to English,
//! translation failure falls back to the untranslated text. Neither ever
//! fails the request.

use std::sync::Arc;

use kontrak_core::{Language, LanguageDetector, TranslationPlan, Translator};

/// A query ready for downstream model/retrieval calls.
#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    /// English (or original, when translation degraded) query text.
    pub text: String,
    /// Direction tracking for the whole request.
    pub plan: TranslationPlan,
}

/// Detect-then-translate front door shared by the chat and analysis entry
/// points.
pub struct QueryNormalizer {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
}

impl QueryNormalizer {
    pub fn new(detector: Arc<dyn LanguageDetector>, translator: Arc<dyn Translator>) -> Self {
        Self {
            detector,
            translator,
        }
    }

    /// Detect the language of `text` and translate Malay input to English.
    pub async fn normalize(
        &self,
        text: &str,
        target_override: Option<Language>,
    ) -> NormalizedQuery {
        let detected = match self.detector.detect(text).await {
            Ok(predictions) => predictions
                .first()
                .map(|p| Language::from_code(&p.code))
                .unwrap_or_default(),
            Err(degraded) => {
                tracing::warn!(%degraded, "language detection unavailable, defaulting to English");
                Language::English
            }
        };

        tracing::debug!(language = detected.code(), "detected input language");

        let plan = TranslationPlan::new(detected.clone()).with_target_override(target_override);

        let text = if detected.is_malay() {
            match self
                .translator
                .translate(text, &Language::Malay, &Language::English)
                .await
            {
                Ok(translated) => translated,
                Err(degraded) => {
                    tracing::warn!(%degraded, "translation unavailable, using original text");
                    text.to_string()
                }
            }
        } else {
            text.to_string()
        };

        NormalizedQuery { text, plan }
    }

    /// Translate the English answer back to Malay when the plan requires it.
    pub async fn finalize(&self, answer: String, plan: &TranslationPlan) -> String {
        if !plan.answer_in_malay() {
            return answer;
        }

        match self
            .translator
            .translate(&answer, &Language::English, &Language::Malay)
            .await
        {
            Ok(translated) => translated,
            Err(degraded) => {
                tracing::warn!(%degraded, "back-translation unavailable, returning English answer");
                answer
            }
        }
    }
}
