//! Bedrock knowledge base client
//!
//! Two flows against the agent runtime:
//! - `retrieve`: vector search returning raw passages for prompt grounding
//! - `generate_grounded`: the provider's retrieve-and-generate flow with
//!   citation references, used by the chat pipeline

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration,
    KnowledgeBaseRetrieveAndGenerateConfiguration, KnowledgeBaseVectorSearchConfiguration,
    RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput, RetrieveAndGenerateType,
};

use kontrak_core::{Degraded, Error, GroundedAnswer, KnowledgeRetriever, Reference, Result};

/// Configuration for the knowledge base client.
#[derive(Debug, Clone, Default)]
pub struct BedrockKnowledgeBaseConfig {
    pub knowledge_base_id: Option<String>,
    /// Model ARN used by retrieve-and-generate.
    pub model_arn: Option<String>,
}

/// Knowledge retriever backed by a Bedrock knowledge base.
#[derive(Clone)]
pub struct BedrockKnowledgeBase {
    client: aws_sdk_bedrockagentruntime::Client,
    config: BedrockKnowledgeBaseConfig,
}

impl BedrockKnowledgeBase {
    pub fn new(
        client: aws_sdk_bedrockagentruntime::Client,
        config: BedrockKnowledgeBaseConfig,
    ) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl KnowledgeRetriever for BedrockKnowledgeBase {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, Degraded> {
        let kb_id = self
            .config
            .knowledge_base_id
            .as_deref()
            .ok_or_else(|| Degraded::new("kb-retrieval", "KNOWLEDGE_BASE_ID not configured"))?;

        let retrieval_query = KnowledgeBaseQuery::builder().text(query).build();

        let retrieval_config = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(
                KnowledgeBaseVectorSearchConfiguration::builder()
                    .number_of_results(top_k as i32)
                    .build(),
            )
            .build();

        let output = self
            .client
            .retrieve()
            .knowledge_base_id(kb_id)
            .retrieval_query(retrieval_query)
            .retrieval_configuration(retrieval_config)
            .send()
            .await
            .map_err(|e| Degraded::new("kb-retrieval", e.to_string()))?;

        let passages: Vec<String> = output
            .retrieval_results()
            .iter()
            .filter_map(|result| result.content().map(|c| c.text().to_string()))
            .collect();

        Ok(passages)
    }

    async fn generate_grounded(&self, query: &str) -> Result<GroundedAnswer> {
        let kb_id = self
            .config
            .knowledge_base_id
            .as_deref()
            .ok_or(Error::MissingConfiguration("KNOWLEDGE_BASE_ID"))?;
        let model_arn = self
            .config
            .model_arn
            .as_deref()
            .ok_or(Error::MissingConfiguration("MODEL_ARN"))?;

        let input = RetrieveAndGenerateInput::builder()
            .text(query)
            .build()
            .map_err(|e| Error::service("bedrock-kb", e))?;

        let kb_config = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(kb_id)
            .model_arn(model_arn)
            .build()
            .map_err(|e| Error::service("bedrock-kb", e))?;

        let rag_config = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(kb_config)
            .build()
            .map_err(|e| Error::service("bedrock-kb", e))?;

        let output = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(rag_config)
            .send()
            .await
            .map_err(|e| Error::service("bedrock-kb", e))?;

        let answer = output
            .output()
            .map(|o| o.text().to_string())
            .ok_or(Error::EmptyModelResponse)?;

        let references: Vec<Reference> = output
            .citations()
            .iter()
            .flat_map(|citation| citation.retrieved_references())
            .filter_map(|reference| {
                let text = reference.content().map(|c| c.text().to_string())?;
                let uri = reference
                    .location()
                    .and_then(|l| l.s3_location())
                    .and_then(|s3| s3.uri())
                    .map(|u| u.to_string());
                Some(Reference { text, uri })
            })
            .collect();

        Ok(GroundedAnswer { answer, references })
    }
}
