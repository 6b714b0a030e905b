use serde::{Deserialize, Serialize};

/// A single text fragment within a turn.
///
/// The upstream API represents all message content as a list of parts; this
/// crate only ever produces and consumes text parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    /// The text content of this part.
    pub text: String,
}

impl Part {
    /// Create a new `Part` with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Role type for a conversation turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// A turn authored by the end user.
    User,

    /// A turn authored by the model.
    Model,
}

/// One turn of a conversation.
///
/// Turns are immutable once created and are owned exclusively by a
/// [`ConversationLog`](crate::ConversationLog). The wire shape matches the
/// upstream `contents` entries: `{"role": "user", "parts": [{"text": "..."}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    /// Who authored this turn.
    pub role: TurnRole,

    /// The content of this turn.
    pub parts: Vec<Part>,
}

impl Turn {
    /// Create a new `Turn` with the given role and a single text part.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::new(text)],
        }
    }

    /// Create a new user `Turn`.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    /// Create a new model `Turn`.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Model, text)
    }

    /// The text of this turn, concatenated across parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn user_turn_wire_shape() {
        let turn = Turn::user("budget $300");
        let json = to_value(&turn).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "user",
                "parts": [{"text": "budget $300"}]
            })
        );
    }

    #[test]
    fn model_turn_wire_shape() {
        let turn = Turn::model("Consider the X phone.");
        let json = to_value(&turn).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "model",
                "parts": [{"text": "Consider the X phone."}]
            })
        );
    }

    #[test]
    fn turn_deserialization() {
        let json = json!({
            "role": "model",
            "parts": [{"text": "Hello "}, {"text": "there."}]
        });

        let turn: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(turn.role, TurnRole::Model);
        assert_eq!(turn.text(), "Hello there.");
    }

    #[test]
    fn text_of_empty_parts() {
        let turn = Turn {
            role: TurnRole::User,
            parts: Vec::new(),
        };
        assert_eq!(turn.text(), "");
    }
}
