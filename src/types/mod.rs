// Public modules
pub mod generate;
pub mod relay;
pub mod turn;

// Re-exports
pub use generate::{
    Candidate, CandidateContent, GenerateContentRequest, GenerateContentResponse,
    SystemInstruction,
};
pub use relay::{ChatAnswer, ChatRequest};
pub use turn::{Part, Turn, TurnRole};
