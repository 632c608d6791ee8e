//! Core traits and types for the kontrak backend
//!
//! This crate provides foundational types used across all other crates:
//! - Trait seams for the managed cloud services (generative model, knowledge
//!   retrieval, language detection, translation, transcription, experts)
//! - Contract analysis report types
//! - Language handling (Malay/English policy)
//! - Error taxonomy

pub mod error;
pub mod expert;
pub mod knowledge;
pub mod language;
pub mod model;
pub mod report;
pub mod traits;
pub mod transcription;

pub use error::{Degraded, Error, Result};
pub use expert::Expert;
pub use knowledge::{GroundedAnswer, Reference};
pub use language::{Language, LanguagePrediction, TranslationPlan};
pub use model::{GenerateRequest, GenerateResponse};
pub use report::{AnalysisReport, AnalysisSummary, Clause, ContractAnalysisRequest, RiskColor};
pub use transcription::{TranscriptionJob, TranscriptionStatus};

pub use traits::{
    ExpertDirectory, GenerativeModel, KnowledgeRetriever, LanguageDetector, MediaStore,
    TranscriptionBackend, Translator,
};
