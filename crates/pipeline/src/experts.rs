//! Expert recommendation
//!
//! Classify the user's prompt into specializations, then look up matching
//! experts in the directory. An empty classification short-circuits to an
//! empty result; a directory failure degrades to an empty result as well —
//! "no experts found" is always a valid answer here.

use std::sync::Arc;

use kontrak_core::{Expert, ExpertDirectory};

use crate::classifier::SpecializationClassifier;

pub struct ExpertRecommender {
    classifier: SpecializationClassifier,
    directory: Arc<dyn ExpertDirectory>,
}

impl ExpertRecommender {
    pub fn new(classifier: SpecializationClassifier, directory: Arc<dyn ExpertDirectory>) -> Self {
        Self {
            classifier,
            directory,
        }
    }

    pub async fn recommend(&self, prompt: &str) -> Vec<Expert> {
        let specializations = self.classifier.classify(prompt).await;
        tracing::info!(?specializations, "matched specializations");

        if specializations.is_empty() {
            return Vec::new();
        }

        match self
            .directory
            .find_by_specializations(&specializations)
            .await
        {
            Ok(experts) => {
                tracing::info!(count = experts.len(), "found matching experts");
                experts
            }
            Err(err) => {
                tracing::warn!(error = %err, "expert directory lookup failed, returning no experts");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kontrak_config::ClassifierConfig;
    use kontrak_core::{Error, GenerateRequest, GenerateResponse, GenerativeModel, Result};
    use std::sync::atomic::{AtomicBool, Ordering};

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

    struct RecordingDirectory {
        queried: AtomicBool,
        result: Result<Vec<Expert>>,
    }

    #[async_trait]
    impl ExpertDirectory for RecordingDirectory {
        async fn find_by_specializations(
            &self,
            specializations: &[String],
        ) -> Result<Vec<Expert>> {
            self.queried.store(true, Ordering::SeqCst);
            assert!(!specializations.is_empty());
            match &self.result {
                Ok(experts) => Ok(experts.clone()),
                Err(_) => Err(Error::service("dynamodb", "down")),
            }
        }
    }

    fn expert() -> Expert {
        Expert {
            id: "e1".to_string(),
            name: "Aisyah binti Rahman".to_string(),
            specialization: "Employment Law".to_string(),
            location: Some("Kuala Lumpur".to_string()),
            phone: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn test_no_classification_skips_directory() {
        let directory = Arc::new(RecordingDirectory {
            queried: AtomicBool::new(false),
            result: Ok(vec![expert()]),
        });
        let recommender = ExpertRecommender::new(
            SpecializationClassifier::new(
                Arc::new(CannedModel("[]".to_string())),
                ClassifierConfig::default(),
            ),
            directory.clone(),
        );

        assert!(recommender.recommend("what's for lunch").await.is_empty());
        assert!(!directory.queried.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_matched_specializations_query_directory() {
        let directory = Arc::new(RecordingDirectory {
            queried: AtomicBool::new(false),
            result: Ok(vec![expert()]),
        });
        let recommender = ExpertRecommender::new(
            SpecializationClassifier::new(
                Arc::new(CannedModel(r#"["Employment Law"]"#.to_string())),
                ClassifierConfig::default(),
            ),
            directory.clone(),
        );

        let experts = recommender.recommend("I was dismissed unfairly").await;
        assert_eq!(experts.len(), 1);
        assert!(directory.queried.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_directory_failure_degrades_to_empty() {
        let directory = Arc::new(RecordingDirectory {
            queried: AtomicBool::new(false),
            result: Err(Error::service("dynamodb", "down")),
        });
        let recommender = ExpertRecommender::new(
            SpecializationClassifier::new(
                Arc::new(CannedModel(r#"["Employment Law"]"#.to_string())),
                ClassifierConfig::default(),
            ),
            directory,
        );

        assert!(recommender.recommend("unfair dismissal").await.is_empty());
    }
}
