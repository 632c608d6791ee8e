//! Orchestration pipelines for the kontrak backend
//!
//! Everything here composes the `kontrak-core` service seams into the
//! user-visible operations:
//! - [`ContractAnalyzer`]: contract text -> structured risk report
//! - [`LegalAdvisor`]: chat question -> knowledge-grounded legal answer
//! - [`QueryNormalizer`]: language detection + Malay/English translation
//! - [`SpecializationClassifier`]: free-form prompt -> specialization labels
//! - [`ExpertRecommender`]: prompt -> matching legal experts
//! - [`TranscriptionPipeline`]: audio bytes -> transcript text
//!
//! All operations are request-scoped and sequential; there is no shared
//! mutable state, no caching and no automatic retry of external calls.

pub mod advice;
pub mod analysis;
pub mod classifier;
pub mod experts;
pub mod extract;
pub mod language;
pub mod prompts;
pub mod transcription;

pub use advice::LegalAdvisor;
pub use analysis::ContractAnalyzer;
pub use classifier::SpecializationClassifier;
pub use experts::ExpertRecommender;
pub use language::{NormalizedQuery, QueryNormalizer};
pub use prompts::{CONTEXT_PLACEHOLDER, SPECIALIZATIONS};
pub use transcription::TranscriptionPipeline;
