//! Conversation history for a single chat session.

use crate::types::Turn;

/// An ordered, append-only sequence of conversation turns.
///
/// The log is the running context sent with every upstream request. It grows
/// monotonically for the life of a session, is never truncated or windowed,
/// and is owned by exactly one [`ChatController`](crate::ChatController).
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// Creates a new, empty log.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a turn to the end of the log.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Returns the current sequence of turns by value.
    ///
    /// The snapshot reflects the log at call time; later appends are never
    /// observable through it, so an in-flight request always carries the
    /// history it was built from.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Returns the turns in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns in the log.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if the log holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Removes every turn, resetting the session context.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
