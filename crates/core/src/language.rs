//! Language handling
//!
//! The backend serves Malaysian users in English and Malay. Detection is
//! best-effort; Indonesian is folded into Malay because the downstream
//! handling is identical for both. Translation direction is decided once at
//! the start of a request and carried in a [`TranslationPlan`] rather than
//! re-derived at the end.

use serde::{Deserialize, Serialize};

/// Languages the backend distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Malay,
    /// Any other detected language; carried by ISO code and treated as
    /// English for routing purposes.
    Other(String),
}

impl Language {
    /// Parse an ISO 639-1 code. Indonesian ("id") folds into Malay.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::English,
            "ms" | "id" => Language::Malay,
            other => Language::Other(other.to_string()),
        }
    }

    /// ISO 639-1 code used for translator calls.
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Malay => "ms",
            Language::Other(code) => code,
        }
    }

    pub fn is_malay(&self) -> bool {
        matches!(self, Language::Malay)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// One entry of the ranked list a language detector returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagePrediction {
    pub code: String,
    pub score: f32,
}

/// Tracks translation direction across a whole request.
///
/// Built when the input is normalized and consulted when the answer is
/// finalized: the back-translation step runs only if the original detected
/// language (or an explicit target override) requested Malay output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPlan {
    /// Language detected on the original input.
    pub detected: Language,
    /// Explicit output-language override from the caller, if any.
    pub target_override: Option<Language>,
}

impl TranslationPlan {
    pub fn new(detected: Language) -> Self {
        Self {
            detected,
            target_override: None,
        }
    }

    pub fn with_target_override(mut self, target: Option<Language>) -> Self {
        self.target_override = target;
        self
    }

    /// Whether the final answer must be translated back to Malay.
    pub fn answer_in_malay(&self) -> bool {
        match &self.target_override {
            Some(target) => target.is_malay(),
            None => self.detected.is_malay(),
        }
    }
}
