//! Application State
//!
//! Shared state across all handlers. The pipelines hold their service
//! clients behind the core trait seams; everything is constructed once at
//! process boot and injected here.

use std::sync::Arc;

use kontrak_aws::{
    AwsClients, BedrockKnowledgeBase, BedrockKnowledgeBaseConfig, BedrockModel,
    BedrockModelConfig, ComprehendDetector, DynamoDbExpertDirectory, S3MediaStore,
    TranscribeBackend, AwsTranslator,
};
use kontrak_config::Settings;
use kontrak_core::{
    ExpertDirectory, GenerativeModel, KnowledgeRetriever, LanguageDetector, MediaStore,
    TranscriptionBackend as TranscriptionBackendTrait, Translator,
};
use kontrak_pipeline::{
    ContractAnalyzer, ExpertRecommender, LegalAdvisor, QueryNormalizer,
    SpecializationClassifier, TranscriptionPipeline,
};

use crate::session::SessionStore;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub analyzer: Arc<ContractAnalyzer>,
    pub advisor: Arc<LegalAdvisor>,
    pub recommender: Arc<ExpertRecommender>,
    pub transcription: Arc<TranscriptionPipeline>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Assemble state from explicit service implementations.
    ///
    /// This is the seam tests use to run the full router against fakes.
    #[allow(clippy::too_many_arguments)]
    pub fn from_services(
        settings: Settings,
        model: Arc<dyn GenerativeModel>,
        retriever: Arc<dyn KnowledgeRetriever>,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        media: Arc<dyn MediaStore>,
        transcriber: Arc<dyn TranscriptionBackendTrait>,
        directory: Arc<dyn ExpertDirectory>,
    ) -> Self {
        let normalizer = Arc::new(QueryNormalizer::new(detector, translator));

        let analyzer = Arc::new(ContractAnalyzer::new(
            model.clone(),
            retriever.clone(),
            normalizer.clone(),
            settings.analysis.clone(),
        ));

        let advisor = Arc::new(LegalAdvisor::new(
            model.clone(),
            retriever,
            normalizer,
            settings.chat.clone(),
        ));

        let recommender = Arc::new(ExpertRecommender::new(
            SpecializationClassifier::new(model, settings.classifier.clone()),
            directory,
        ));

        let transcription = Arc::new(TranscriptionPipeline::new(
            media,
            transcriber,
            settings.transcription.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            analyzer,
            advisor,
            recommender,
            transcription,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// Assemble state with the AWS implementations of every seam.
    pub fn from_aws(settings: Settings, clients: &AwsClients) -> Self {
        let model: Arc<dyn GenerativeModel> = Arc::new(BedrockModel::new(
            clients.bedrock.clone(),
            BedrockModelConfig {
                model_id: settings.aws.model_id.clone(),
            },
        ));

        let retriever: Arc<dyn KnowledgeRetriever> = Arc::new(BedrockKnowledgeBase::new(
            clients.bedrock_agent.clone(),
            BedrockKnowledgeBaseConfig {
                knowledge_base_id: settings.aws.knowledge_base_id.clone(),
                model_arn: settings.aws.model_arn.clone(),
            },
        ));

        let detector: Arc<dyn LanguageDetector> =
            Arc::new(ComprehendDetector::new(clients.comprehend.clone()));

        let translator: Arc<dyn Translator> =
            Arc::new(AwsTranslator::new(clients.translate.clone()));

        let media: Arc<dyn MediaStore> = Arc::new(S3MediaStore::new(
            clients.s3.clone(),
            settings.aws.s3_bucket.clone(),
        ));

        let transcriber: Arc<dyn TranscriptionBackendTrait> = Arc::new(TranscribeBackend::new(
            clients.transcribe.clone(),
            settings.aws.s3_bucket.clone(),
        ));

        let directory: Arc<dyn ExpertDirectory> = Arc::new(DynamoDbExpertDirectory::new(
            clients.dynamodb.clone(),
            settings.aws.experts_table.clone(),
        ));

        Self::from_services(
            settings, model, retriever, detector, translator, media, transcriber, directory,
        )
    }
}
