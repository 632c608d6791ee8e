//! Contract analysis pipeline
//!
//! Turns raw contract text into a validated [`AnalysisReport`]:
//!
//! 1. Build the fixed analysis prompt (contract text and grounding context in
//!    their delimited slots).
//! 2. Invoke the generative model with a bounded generation length.
//! 3. Best-effort extraction of the JSON object from the free-form output.
//! 4. Integrity correction: recompute the summary counts from the clause
//!    list, ignoring whatever the model reported.
//! 5. Echo the analyzed document text for traceability.
//!
//! The model is the only component that segments the contract into clauses;
//! this pipeline validates and corrects, it does not re-segment.

use serde::Deserialize;
use std::sync::Arc;

use kontrak_config::AnalysisConfig;
use kontrak_core::{
    AnalysisReport, Clause, ContractAnalysisRequest, Error, GenerateRequest, GenerativeModel,
    KnowledgeRetriever, Result,
};

use crate::extract::json_object_span;
use crate::language::QueryNormalizer;
use crate::prompts::{analysis_prompt, join_context};

/// What the model actually returns. The reported `summary` is parsed and
/// discarded; only the clause list is trusted.
#[derive(Deserialize)]
struct ModelAnalysis {
    clauses: Vec<Clause>,
}

/// The contract analysis pipeline.
pub struct ContractAnalyzer {
    model: Arc<dyn GenerativeModel>,
    retriever: Arc<dyn KnowledgeRetriever>,
    normalizer: Arc<QueryNormalizer>,
    config: AnalysisConfig,
}

impl ContractAnalyzer {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        retriever: Arc<dyn KnowledgeRetriever>,
        normalizer: Arc<QueryNormalizer>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            model,
            retriever,
            normalizer,
            config,
        }
    }

    /// Full entry point: language handling and context retrieval, then the
    /// core analysis.
    ///
    /// Malay (or Indonesian) contracts are translated to English before
    /// analysis; both the translation and the knowledge-base retrieval are
    /// best-effort and degrade without failing the request.
    pub async fn analyze_document(&self, document_text: &str) -> Result<AnalysisReport> {
        if document_text.trim().is_empty() {
            return Err(Error::InvalidInput("no document text provided".to_string()));
        }

        let normalized = self.normalizer.normalize(document_text, None).await;

        let retrieved_context = match self
            .retriever
            .retrieve(&normalized.text, self.config.retrieval_top_k)
            .await
        {
            Ok(passages) if !passages.is_empty() => {
                tracing::info!(count = passages.len(), "retrieved knowledge base context");
                Some(passages)
            }
            Ok(_) => None,
            Err(degraded) => {
                tracing::warn!(%degraded, "proceeding without knowledge base context");
                None
            }
        };

        let request = ContractAnalysisRequest {
            document_text: normalized.text,
            detected_language: Some(normalized.plan.detected.code().to_string()),
            retrieved_context,
        };

        self.analyze(&request).await
    }

    /// Core operation: prompt, invoke, extract, correct.
    ///
    /// Fails with `InvalidInput` before any outbound call when the document
    /// text is empty.
    pub async fn analyze(&self, request: &ContractAnalysisRequest) -> Result<AnalysisReport> {
        if request.document_text.trim().is_empty() {
            return Err(Error::InvalidInput("no document text provided".to_string()));
        }

        let context = join_context(request.retrieved_context.as_deref());
        let prompt = analysis_prompt(&request.document_text, &context);

        let response = self
            .model
            .generate(&GenerateRequest::new(
                prompt,
                self.config.max_gen_len,
                self.config.temperature,
            ))
            .await?;

        if response.is_empty() {
            return Err(Error::EmptyModelResponse);
        }

        let clauses = Self::extract_clauses(&response.generation)?;

        Ok(AnalysisReport::from_clauses(
            clauses,
            request.document_text.clone(),
        ))
    }

    /// Locate and parse the JSON object in the generation. The model's own
    /// summary object is ignored; unparseable output is a terminal error
    /// carrying the raw text.
    fn extract_clauses(generation: &str) -> Result<Vec<Clause>> {
        let span = json_object_span(generation).ok_or_else(|| Error::MalformedModelOutput {
            message: "no JSON object found in model output".to_string(),
            raw: generation.to_string(),
        })?;

        let parsed: ModelAnalysis =
            serde_json::from_str(span).map_err(|e| Error::MalformedModelOutput {
                message: e.to_string(),
                raw: generation.to_string(),
            })?;

        Ok(parsed.clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kontrak_core::{
        Degraded, GenerateResponse, GroundedAnswer, LanguageDetector, LanguagePrediction,
        RiskColor, Translator,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedModel {
        generation: String,
        calls: AtomicUsize,
    }

    impl CannedModel {
        fn new(generation: &str) -> Self {
            Self {
                generation: generation.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GenerateResponse {
                generation: self.generation.clone(),
            })
        }

        fn model_id(&self) -> &str {
            "canned"
        }
    }

    struct NoRetriever;

    #[async_trait]
    impl KnowledgeRetriever for NoRetriever {
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
                score: 0.99,
            }])
        }
    }

    struct NoTranslator;

    #[async_trait]
    impl Translator for NoTranslator {
        async fn translate(
            &self,
            _text: &str,
            _source: &kontrak_core::Language,
            _target: &kontrak_core::Language,
        ) -> Result<String, Degraded> {
            Err(Degraded::new("translation", "not configured"))
        }
    }

    fn analyzer(model: Arc<CannedModel>) -> ContractAnalyzer {
        let normalizer = Arc::new(QueryNormalizer::new(
            Arc::new(EnglishDetector),
            Arc::new(NoTranslator),
        ));
        ContractAnalyzer::new(
            model,
            Arc::new(NoRetriever),
            normalizer,
            AnalysisConfig::default(),
        )
    }

    const GOOD_OUTPUT: &str = r#"Here is the analysis you asked for:
{
  "summary": {"criticalIssues": 99, "areasForCaution": 99},
  "clauses": [
    {"title": "Termination", "originalText": "Either party may terminate without notice.",
     "color": "Red", "explanation": "No notice period.", "whyItMatters": "You can be dismissed instantly.",
     "suggestion": "Negotiate to change the notice terms."},
    {"title": "Working Hours", "originalText": "48 hours per week.",
     "color": "Yellow", "explanation": "At the statutory maximum.", "whyItMatters": "No headroom for overtime.",
     "suggestion": "Request clarification on overtime pay."},
    {"title": "Annual Leave", "originalText": "Twelve days of paid leave.",
     "color": "Green", "explanation": "Meets the statutory minimum.", "whyItMatters": "Standard entitlement.",
     "suggestion": "This is a standard clause."}
  ]
}
Thanks for using the service!"#;

    #[tokio::test]
    async fn test_summary_recomputed_from_clauses() {
        let analyzer = analyzer(Arc::new(CannedModel::new(GOOD_OUTPUT)));
        let request = ContractAnalysisRequest::new("some contract").unwrap();
        let report = analyzer.analyze(&request).await.unwrap();

        // The model claimed 99/99; the pipeline recomputes 1 Red and 1 Yellow.
        assert_eq!(report.summary.critical_issues, 1);
        assert_eq!(report.summary.areas_for_caution, 1);
        assert_eq!(report.clauses.len(), 3);
        assert_eq!(report.clauses[0].color, RiskColor::Red);
    }

    #[tokio::test]
    async fn test_document_text_round_trips_exactly() {
        let analyzer = analyzer(Arc::new(CannedModel::new(GOOD_OUTPUT)));
        let text = "  EMPLOYMENT AGREEMENT\n\nClause 1 ...  ";
        let request = ContractAnalysisRequest::new(text).unwrap();
        let report = analyzer.analyze(&request).await.unwrap();
        assert_eq!(report.document_text, text);
    }

    #[tokio::test]
    async fn test_empty_input_fails_before_any_outbound_call() {
        let model = Arc::new(CannedModel::new(GOOD_OUTPUT));
        let analyzer = analyzer(model.clone());

        let request = ContractAnalysisRequest {
            document_text: "   ".to_string(),
            detected_language: None,
            retrieved_context: None,
        };
        let err = analyzer.analyze(&request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_brace_is_malformed_output() {
        let analyzer = analyzer(Arc::new(CannedModel::new(
            "I cannot produce a structured analysis for this document.",
        )));
        let request = ContractAnalysisRequest::new("contract").unwrap();
        let err = analyzer.analyze(&request).await.unwrap_err();

        match err {
            Error::MalformedModelOutput { raw, .. } => {
                assert!(raw.contains("cannot produce"));
            }
            other => panic!("expected MalformedModelOutput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_span_is_malformed_output() {
        let analyzer = analyzer(Arc::new(CannedModel::new("{not valid json}")));
        let request = ContractAnalysisRequest::new("contract").unwrap();
        assert!(matches!(
            analyzer.analyze(&request).await,
            Err(Error::MalformedModelOutput { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_generation_is_terminal() {
        let analyzer = analyzer(Arc::new(CannedModel::new("   ")));
        let request = ContractAnalysisRequest::new("contract").unwrap();
        assert!(matches!(
            analyzer.analyze(&request).await,
            Err(Error::EmptyModelResponse)
        ));
    }

    #[tokio::test]
    async fn test_retrieval_failure_degrades_to_placeholder() {
        // NoRetriever always degrades; the full entry point must still
        // produce a valid report.
        let analyzer = analyzer(Arc::new(CannedModel::new(GOOD_OUTPUT)));
        let report = analyzer.analyze_document("a contract").await.unwrap();
        assert_eq!(report.summary.critical_issues, 1);
    }
}
