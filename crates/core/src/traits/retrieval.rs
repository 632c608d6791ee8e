//! Knowledge base seam

use async_trait::async_trait;

use crate::error::{Degraded, Result};
use crate::knowledge::GroundedAnswer;

/// A hosted retrieval-augmented knowledge base.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Return up to `top_k` supporting passages for a query, best first.
    ///
    /// Retrieval is an optional enrichment: failures come back as
    /// [`Degraded`], and callers proceed without context.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, Degraded>;

    /// Run the provider's combined retrieve-and-generate flow, returning the
    /// generated answer plus citation references.
    async fn generate_grounded(&self, query: &str) -> Result<GroundedAnswer>;
}
