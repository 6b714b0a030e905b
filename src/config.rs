//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_MODEL;
use crate::persona::MOBILE_GURU;

/// Default total attempts per message, including the first call.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Command-line arguments for the mobileguru-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Upstream model to use.
    #[arrrg(optional, "Model to use (default: gemini-2.5-flash-preview-09-2025)", "MODEL")]
    pub model: Option<String>,

    /// Base URL of the generateContent API.
    #[arrrg(optional, "Base URL of the upstream API", "URL")]
    pub endpoint: Option<String>,

    /// System instruction overriding the MobileGuru persona.
    #[arrrg(optional, "System instruction for the conversation", "PROMPT")]
    pub system: Option<String>,

    /// Total attempts per message before giving up.
    #[arrrg(optional, "Max attempts per message (default: 5)", "COUNT")]
    pub max_attempts: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: String,

    /// Optional override for the upstream base URL.
    pub endpoint: Option<String>,

    /// The system instruction sent with every request.
    pub system_prompt: String,

    /// Total attempts per message, including the first call.
    pub max_attempts: u32,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gemini-2.5-flash-preview-09-2025
    /// - System prompt: the MobileGuru persona
    /// - Max attempts: 5
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            system_prompt: MOBILE_GURU.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the upstream base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the attempt bound.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            model: args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: args.endpoint,
            system_prompt: args.system.unwrap_or_else(|| MOBILE_GURU.to_string()),
            max_attempts: args.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            use_color: !args.no_color,
        }
    }
}
