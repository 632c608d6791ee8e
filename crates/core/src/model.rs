//! Generative model request/response contract
//!
//! Mirrors the invoke-model wire shape of the hosted model: a single prompt
//! string in, a single generation string out.

use serde::{Deserialize, Serialize};

/// Request to the generative model.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_gen_len: u32,
    pub temperature: f32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, max_gen_len: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_gen_len,
            temperature,
        }
    }
}

/// Response from the generative model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    /// Free-form generated text. May be empty; callers decide whether an
    /// empty generation is an error.
    #[serde(default)]
    pub generation: String,
}

impl GenerateResponse {
    pub fn is_empty(&self) -> bool {
        self.generation.trim().is_empty()
    }
}
