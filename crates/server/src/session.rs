//! Chat session store
//!
//! In-memory store for chat sessions and their message history. Sessions are
//! request-scoped conveniences for the frontend; nothing here survives a
//! restart, and nothing needs to.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// For user messages: uploaded-document context. For assistant messages:
    /// serialized citation references, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_context: Option<String>,
}

/// Insert payload for a new message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertChatMessage {
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub document_context: Option<String>,
}

/// In-memory session and message store.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, ChatSession>,
    messages: DashMap<String, Vec<ChatMessage>>,
    next_message_id: AtomicI64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(&self, id: String, title: String) -> ChatSession {
        let session = ChatSession {
            id: id.clone(),
            title,
            created_at: Utc::now(),
        };
        self.sessions.insert(id, session.clone());
        session
    }

    pub fn get_session(&self, id: &str) -> Option<ChatSession> {
        self.sessions.get(id).map(|s| s.clone())
    }

    pub fn messages(&self, session_id: &str) -> Vec<ChatMessage> {
        self.messages
            .get(session_id)
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn add_message(&self, insert: InsertChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
            session_id: insert.session_id.clone(),
            role: insert.role,
            content: insert.content,
            created_at: Utc::now(),
            document_context: insert.document_context,
        };
        self.messages
            .entry(insert.session_id)
            .or_default()
            .push(message.clone());
        message
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
