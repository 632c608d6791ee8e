//! Generative model seam

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{GenerateRequest, GenerateResponse};

/// A hosted generative language model.
///
/// # Example
///
/// ```ignore
/// let model: Arc<dyn GenerativeModel> = Arc::new(BedrockModel::new(&sdk, config)?);
/// let response = model
///     .generate(&GenerateRequest::new("Summarize...", 512, 0.2))
///     .await?;
/// println!("{}", response.generation);
/// ```
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text for a single prompt with bounded length.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Model identifier for logging.
    fn model_id(&self) -> &str;
}
