//! Trait seams for the managed cloud services
//!
//! Every external collaborator sits behind one of these traits so that:
//! - Pipelines depend on behavior, not on a specific cloud SDK
//! - Tests run against mocks with no network access
//! - Client handles are constructed once at process boot and injected
//!
//! # Seams
//!
//! ```text
//! Generation:
//!   - GenerativeModel: prompt -> free-form generated text
//!
//! Retrieval:
//!   - KnowledgeRetriever: query -> ranked passages / grounded answer
//!
//! Text processing:
//!   - LanguageDetector: text -> ranked language predictions (best-effort)
//!   - Translator: text + direction -> translated text (best-effort)
//!
//! Speech:
//!   - MediaStore: audio bytes -> object-storage URI
//!   - TranscriptionBackend: job submit / status poll / transcript fetch
//!
//! Directory:
//!   - ExpertDirectory: specializations -> experts
//! ```

mod experts;
mod language;
mod model;
mod retrieval;
mod transcription;

pub use experts::ExpertDirectory;
pub use language::{LanguageDetector, Translator};
pub use model::GenerativeModel;
pub use retrieval::KnowledgeRetriever;
pub use transcription::{MediaStore, TranscriptionBackend};
