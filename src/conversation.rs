use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::models::message::ChatMessage;
use crate::models::role::Role;

/// One user turn paired with the assistant turn that answers it, if any.
///
/// An interaction with no output message represents a turn still awaiting
/// (or never receiving) a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    input_message: ChatMessage,
    output_message: Option<ChatMessage>,
    goal: Option<String>,
}

impl Interaction {
    fn new(input_message: ChatMessage) -> Self {
        Interaction {
            input_message,
            output_message: None,
            goal: None,
        }
    }

    pub fn input_message(&self) -> &ChatMessage {
        &self.input_message
    }

    pub fn output_message(&self) -> Option<&ChatMessage> {
        self.output_message.as_ref()
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Label this interaction with the goal a caller derived for it
    pub fn set_goal<S: Into<String>>(&mut self, goal: S) {
        self.goal = Some(goal.into());
    }
}

/// The authoritative ordered transcript of a chat session, plus a derived
/// index pairing user turns with the assistant turns that answer them.
///
/// Messages are owned by copy throughout: the transcript and each
/// interaction hold their own `ChatMessage` values, for appends and for
/// `reset` alike.
#[derive(Debug, Clone)]
pub struct Conversation {
    uuid: Uuid,
    datetime: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    interactions: Vec<Interaction>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    /// Create a conversation seeded with an existing transcript. Seed
    /// messages are recorded but not indexed, the same as after a `reset`.
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Conversation {
            uuid: Uuid::new_v4(),
            datetime: Utc::now(),
            messages,
            interactions: Vec::new(),
        }
    }

    /// Append one message, dispatching on its role.
    ///
    /// A user message opens a new interaction. An assistant message closes
    /// the current interaction if it is still open; otherwise it is
    /// recorded in the transcript but indexed by nothing. Any other role is
    /// a logged no-op.
    pub fn append_message(&mut self, message: ChatMessage) -> &mut Self {
        match message.role {
            Role::User => self.append_user_message(message),
            Role::Assistant => self.append_assistant_message(message),
            _ => {
                tracing::warn!(
                    role = ?message.role,
                    "only user and assistant messages can be appended to the conversation"
                );
                self
            }
        }
    }

    fn append_user_message(&mut self, message: ChatMessage) -> &mut Self {
        self.interactions.push(Interaction::new(message.clone()));
        self.messages.push(message);
        self
    }

    fn append_assistant_message(&mut self, message: ChatMessage) -> &mut Self {
        match self.interactions.last_mut() {
            Some(interaction) if interaction.output_message.is_none() => {
                interaction.output_message = Some(message.clone());
            }
            _ => {
                // Replies can arrive with no open turn, e.g. an agent
                // announcing it cannot handle a task. Keep the transcript
                // faithful and leave the index alone.
                tracing::warn!("assistant message recorded without an open interaction");
            }
        }
        self.messages.push(message);
        self
    }

    /// The most recent interaction, answered or not
    pub fn current_interaction(&self) -> Option<&Interaction> {
        self.interactions.last()
    }

    /// Find the interaction a message belongs to by comparing text content,
    /// scanning from the end so the latest match wins
    pub fn find_interaction(&self, message: &ChatMessage) -> Option<&Interaction> {
        self.interactions
            .iter()
            .rev()
            .find(|interaction| match message.role {
                Role::User => interaction.input_message.content_text() == message.content_text(),
                Role::Assistant => interaction
                    .output_message
                    .as_ref()
                    .is_some_and(|output| output.content_text() == message.content_text()),
                _ => false,
            })
    }

    /// Replace the transcript and drop the derived index entirely. The new
    /// transcript is not re-indexed.
    pub fn reset(&mut self, messages: Vec<ChatMessage>) -> &mut Self {
        self.messages = messages;
        self.interactions.clear();
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Mutable access to the most recent interaction, for goal labelling
    pub fn current_interaction_mut(&mut self) -> Option<&mut Interaction> {
        self.interactions.last_mut()
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    /// Unique storage key combining creation time and uuid
    pub fn key(&self) -> String {
        format!(
            "conversation_{}_{}",
            self.datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.uuid
        )
    }

    /// Serialize the filtered interactions as `[{goal, user, assistant}]`
    /// records for export; missing text defaults to the empty string
    pub fn to_json_string<F>(&self, filter: F) -> serde_json::Result<String>
    where
        F: Fn(&Interaction) -> bool,
    {
        let records: Vec<_> = self
            .interactions
            .iter()
            .filter(|interaction| filter(interaction))
            .map(|interaction| {
                json!({
                    "goal": interaction.goal().unwrap_or(""),
                    "user": interaction.input_message.content_text(),
                    "assistant": interaction
                        .output_message
                        .as_ref()
                        .map(|message| message.content_text())
                        .unwrap_or(""),
                })
            })
            .collect();
        serde_json::to_string(&records)
    }
}
