//! Legal-advice chat pipeline
//!
//! Preferred path is the knowledge base's retrieve-and-generate flow, which
//! returns a grounded answer with citations. When the knowledge base is
//! unavailable or unconfigured, the pipeline falls back to a direct model
//! invocation with the fixed employment-law system prompt.

use std::sync::Arc;

use kontrak_config::ChatConfig;
use kontrak_core::{
    GenerateRequest, GenerativeModel, GroundedAnswer, KnowledgeRetriever, Language, Result,
};

use crate::language::QueryNormalizer;
use crate::prompts::{chat_prompt, CHAT_SYSTEM_PROMPT};

/// Fixed reply when even the fallback invocation returns nothing.
const EMPTY_ANSWER_FALLBACK: &str = "Sorry, I could not generate a response.";

/// The chat pipeline.
pub struct LegalAdvisor {
    model: Arc<dyn GenerativeModel>,
    retriever: Arc<dyn KnowledgeRetriever>,
    normalizer: Arc<QueryNormalizer>,
    config: ChatConfig,
}

impl LegalAdvisor {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        retriever: Arc<dyn KnowledgeRetriever>,
        normalizer: Arc<QueryNormalizer>,
        config: ChatConfig,
    ) -> Self {
        Self {
            model,
            retriever,
            normalizer,
            config,
        }
    }

    /// Answer a user question, optionally grounded in an uploaded document.
    ///
    /// `target_language` overrides the output language; otherwise the answer
    /// comes back in the language the question was asked in (Malay questions
    /// get Malay answers).
    pub async fn advise(
        &self,
        prompt: &str,
        document_context: Option<&str>,
        target_language: Option<Language>,
    ) -> Result<GroundedAnswer> {
        let normalized = self.normalizer.normalize(prompt, target_language).await;

        let mut answer = match self.retriever.generate_grounded(&normalized.text).await {
            Ok(grounded) => grounded,
            Err(err) => {
                tracing::warn!(error = %err, "knowledge base unavailable, falling back to direct invocation");
                self.direct_answer(&normalized.text, document_context).await?
            }
        };

        answer.answer = self.normalizer.finalize(answer.answer, &normalized.plan).await;
        Ok(answer)
    }

    /// Direct model invocation with the fixed system prompt.
    async fn direct_answer(
        &self,
        query: &str,
        document_context: Option<&str>,
    ) -> Result<GroundedAnswer> {
        let user = match document_context {
            Some(context) => format!("Document Context:\n{context}\n\nUser Query:\n{query}"),
            None => query.to_string(),
        };

        let response = self
            .model
            .generate(&GenerateRequest::new(
                chat_prompt(CHAT_SYSTEM_PROMPT, &user),
                self.config.max_gen_len,
                self.config.temperature,
            ))
            .await?;

        if response.is_empty() {
            // The chat endpoint is conversational; an empty generation gets a
            // polite fixed reply rather than an error.
            return Ok(GroundedAnswer::plain(EMPTY_ANSWER_FALLBACK));
        }

        Ok(GroundedAnswer::plain(response.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kontrak_core::{Degraded, Error, GenerateResponse, LanguageDetector, LanguagePrediction, Reference, Translator};

    struct CannedModel(String);

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse> {
            Ok(GenerateResponse {
                generation: self.0.clone(),
            })
        }

        fn model_id(&self) -> &str {
            "canned"
        }
    }

    struct GroundedRetriever;

    #[async_trait]
    impl KnowledgeRetriever for GroundedRetriever {
        async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<Vec<String>, Degraded> {
            Ok(vec!["passage".to_string()])
        }

        async fn generate_grounded(&self, _query: &str) -> Result<GroundedAnswer> {
            Ok(GroundedAnswer {
                answer: "grounded answer".to_string(),
                references: vec![Reference {
                    text: "Employment Act 1955, s. 12".to_string(),
                    uri: Some("s3://kb/act.pdf".to_string()),
                }],
            })
        }
    }

    struct UnconfiguredRetriever;

    #[async_trait]
    impl KnowledgeRetriever for UnconfiguredRetriever {
        async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<Vec<String>, Degraded> {
            Err(Degraded::new("kb-retrieval", "not configured"))
        }

        async fn generate_grounded(&self, _query: &str) -> Result<GroundedAnswer> {
            Err(Error::MissingConfiguration("KNOWLEDGE_BASE_ID"))
        }
    }

    struct EnglishDetector;

    #[async_trait]
    impl LanguageDetector for EnglishDetector {
        async fn detect(&self, _text: &str) -> Result<Vec<LanguagePrediction>, Degraded> {
            Ok(vec![LanguagePrediction {
                code: "en".to_string(),
                score: 1.0,
            }])
        }
    }

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &Language,
            target: &Language,
        ) -> Result<String, Degraded> {
            Ok(format!("({}) {}", target.code(), text))
        }
    }

    fn normalizer() -> Arc<QueryNormalizer> {
        Arc::new(QueryNormalizer::new(
            Arc::new(EnglishDetector),
            Arc::new(EchoTranslator),
        ))
    }

    #[tokio::test]
    async fn test_grounded_answer_with_references() {
        let advisor = LegalAdvisor::new(
            Arc::new(CannedModel("unused".to_string())),
            Arc::new(GroundedRetriever),
            normalizer(),
            ChatConfig::default(),
        );

        let answer = advisor.advise("what is my notice period?", None, None).await.unwrap();
        assert_eq!(answer.answer, "grounded answer");
        assert_eq!(answer.references.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_to_direct_invocation() {
        let advisor = LegalAdvisor::new(
            Arc::new(CannedModel("direct answer".to_string())),
            Arc::new(UnconfiguredRetriever),
            normalizer(),
            ChatConfig::default(),
        );

        let answer = advisor.advise("what is my notice period?", None, None).await.unwrap();
        assert_eq!(answer.answer, "direct answer");
        assert!(answer.references.is_empty());
    }

    #[tokio::test]
    async fn test_empty_generation_gets_polite_fallback() {
        let advisor = LegalAdvisor::new(
            Arc::new(CannedModel(String::new())),
            Arc::new(UnconfiguredRetriever),
            normalizer(),
            ChatConfig::default(),
        );

        let answer = advisor.advise("hello", None, None).await.unwrap();
        assert_eq!(answer.answer, EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_target_language_override_back_translates() {
        let advisor = LegalAdvisor::new(
            Arc::new(CannedModel("the answer".to_string())),
            Arc::new(UnconfiguredRetriever),
            normalizer(),
            ChatConfig::default(),
        );

        let answer = advisor
            .advise("question", None, Some(Language::Malay))
            .await
            .unwrap();
        assert_eq!(answer.answer, "(ms) the answer");
    }
}
