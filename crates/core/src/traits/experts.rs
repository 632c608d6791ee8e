//! Expert directory seam

use async_trait::async_trait;

use crate::error::Result;
use crate::expert::Expert;

/// The directory of legal experts, keyed by specialization.
#[async_trait]
pub trait ExpertDirectory: Send + Sync {
    /// All experts matching any of the given specializations.
    async fn find_by_specializations(&self, specializations: &[String]) -> Result<Vec<Expert>>;
}
