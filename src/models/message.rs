use super::content::{ContentPart, MessageContent};
use super::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A single turn of dialogue, to or from the model.
///
/// Serializes directly to the provider's message shape; `name` is omitted
/// when unset.
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn new<C: Into<MessageContent>>(role: Role, content: C) -> Self {
        ChatMessage {
            role,
            content: content.into(),
            name: None,
        }
    }

    /// Create a system message with plain text content
    pub fn system<S: Into<String>>(text: S) -> Self {
        Self::new(Role::System, text.into())
    }

    /// Create a user message with plain text content
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Role::User, text.into())
    }

    /// Create an assistant message with plain text content
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::new(Role::Assistant, text.into())
    }

    /// Create a message whose content is an ordered part sequence
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self::new(role, parts)
    }

    /// Set the display label for this message
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// First text carried by this message, empty when there is none
    pub fn content_text(&self) -> &str {
        self.content.first_text().unwrap_or("")
    }
}
