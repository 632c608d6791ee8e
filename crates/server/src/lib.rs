//! Kontrak HTTP Server
//!
//! Exposes the analysis, chat, expert and transcription pipelines as REST
//! endpoints, with an in-memory chat session store.

pub mod http;
pub mod metrics;
pub mod session;
pub mod state;

pub use http::create_router;
pub use metrics::init_metrics;
pub use session::{ChatMessage, ChatSession, InsertChatMessage, MessageRole, SessionStore};
pub use state::AppState;
