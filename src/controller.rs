//! Orchestration of a single send-message interaction.

use crate::client::Relay;
use crate::log::ConversationLog;
use crate::persona::FALLBACK_ANSWER;
use crate::retry::RetryPolicy;
use crate::types::Turn;

/// The user-visible result of one send-message interaction.
///
/// A controller never raises: every invocation resolves to one of these, so
/// the caller is never left in an unresolved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The model answered and its turn was appended to the log.
    Answer(String),

    /// The relay failed; the log keeps only the pending user turn.
    Unavailable {
        /// Fixed fallback text for display in place of an answer.
        fallback: String,
        /// The failure's message, for diagnostic display.
        detail: String,
    },

    /// A send was already in flight; nothing was mutated.
    Busy,
}

/// Clears the sending flag when the send path unwinds, including when the
/// in-flight future is dropped at an await point.
struct SendingGuard<'a>(&'a mut bool);

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Drives one conversation against a relay.
///
/// The controller owns the session's [`ConversationLog`] and enforces the
/// at-most-one-in-flight invariant: a `send_message` issued while another is
/// still running is rejected outright. Each accepted send appends the user
/// turn, snapshots the log, runs the retry-wrapped relay call, and appends
/// the model turn only on success, so the log always reflects exactly the
/// turns actually exchanged.
pub struct ChatController<R: Relay> {
    relay: R,
    retry: RetryPolicy,
    instruction: String,
    log: ConversationLog,
    sending: bool,
}

impl<R: Relay> ChatController<R> {
    /// Creates a controller with the default retry policy.
    pub fn new(relay: R, instruction: impl Into<String>) -> Self {
        Self {
            relay,
            retry: RetryPolicy::default(),
            instruction: instruction.into(),
            log: ConversationLog::new(),
            sending: false,
        }
    }

    /// Replaces the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends one user message and resolves to a user-visible outcome.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        if self.sending {
            return SendOutcome::Busy;
        }
        self.sending = true;
        // Back to idle on every path, even if this future is dropped mid-await.
        let _guard = SendingGuard(&mut self.sending);

        self.log.append(Turn::user(text));
        let snapshot = self.log.snapshot();
        let history = snapshot.as_slice();
        let relay = &self.relay;
        let instruction = self.instruction.as_str();
        let result = self
            .retry
            .run(move || relay.generate(history, instruction))
            .await;

        match result {
            Ok(answer) => {
                self.log.append(Turn::model(answer.clone()));
                SendOutcome::Answer(answer)
            }
            Err(err) => SendOutcome::Unavailable {
                fallback: FALLBACK_ANSWER.to_string(),
                detail: err.to_string(),
            },
        }
    }

    /// Returns the conversation log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Returns the persona instruction sent with every request.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Replaces the persona instruction for subsequent requests.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }
}
