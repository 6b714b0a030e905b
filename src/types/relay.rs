use serde::{Deserialize, Serialize};

use crate::types::Turn;

/// Request body for the relay's `POST /chat` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The full conversation history to answer against.
    #[serde(rename = "chatHistory")]
    pub chat_history: Vec<Turn>,
}

impl ChatRequest {
    /// Create a new `ChatRequest` from a history snapshot.
    pub fn new(chat_history: Vec<Turn>) -> Self {
        Self { chat_history }
    }
}

/// Success body for the relay's `POST /chat` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatAnswer {
    /// The model's answer text.
    pub answer: String,
}

impl ChatAnswer {
    /// Create a new `ChatAnswer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}
