//! Knowledge-grounded answer types

use serde::{Deserialize, Serialize};

/// A supporting passage the knowledge base cited for an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub text: String,
    pub uri: Option<String>,
}

/// An answer generated with knowledge-base grounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundedAnswer {
    pub answer: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl GroundedAnswer {
    /// An answer with no citations (direct model invocation fallback).
    pub fn plain(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            references: Vec::new(),
        }
    }
}
