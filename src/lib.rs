// Public modules
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod log;
pub mod observability;
pub mod persona;
pub mod render;
pub mod retry;
pub mod server;
pub mod types;

// Re-exports
pub use client::{GeminiClient, Relay};
pub use controller::{ChatController, SendOutcome};
pub use error::{Error, ErrorKind, Result};
pub use log::ConversationLog;
pub use retry::RetryPolicy;
pub use types::*;
