use serde::{Deserialize, Serialize};

use crate::types::{Part, Turn};

/// The system instruction attached to every upstream request.
///
/// The instruction is the first thing the model sees; it is not part of the
/// turn sequence itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInstruction {
    /// The instruction text, as a list of parts.
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    /// Create a new `SystemInstruction` with a single text part.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::new(text)],
        }
    }
}

/// Request payload for the upstream `generateContent` endpoint.
///
/// Constructed fresh for every call and never retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The full conversation history, in insertion order.
    pub contents: Vec<Turn>,

    /// The persona instruction for this request.
    pub system_instruction: SystemInstruction,
}

impl GenerateContentRequest {
    /// Create a new request pairing a history snapshot with an instruction.
    pub fn new(contents: Vec<Turn>, instruction: impl Into<String>) -> Self {
        Self {
            contents,
            system_instruction: SystemInstruction::new(instruction),
        }
    }
}

/// The content of a response candidate.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CandidateContent {
    /// The content parts; absent parts deserialize as empty.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// The generated content, if any.
    pub content: Option<CandidateContent>,
}

/// Response payload from the upstream `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct GenerateContentResponse {
    /// The generated candidates; absent candidates deserialize as empty.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The answer text at `candidates[0].content.parts[0].text`, if present
    /// and non-empty.
    pub fn answer_text(&self) -> Option<&str> {
        let text = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_str();
        if text.is_empty() { None } else { Some(text) }
    }
}
