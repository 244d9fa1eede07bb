use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::content::{ContentPart, MessageContent};
use crate::models::message::ChatMessage;
use crate::models::tool::Action;

/// Models that accept part-sequence content, by exact name. This
/// classification, not the caller's multimodal flag, governs content
/// normalization.
pub const MULTIMODAL_MODELS: &[&str] = &["glm-4v-plus", "gpt-4o-mini"];

pub fn is_multimodal_model(model: &str) -> bool {
    MULTIMODAL_MODELS.contains(&model)
}

/// Non-streaming completion response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallPayload>,
}

/// One increment of a streaming completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallPayload>,
}

/// A requested tool call as serialized by the provider, in both full
/// responses and stream deltas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCallPayload {
    #[serde(default)]
    pub function: FunctionPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// Rewrite a transcript into the content shape the resolved model expects.
///
/// A multimodal model takes part sequences: when any message still holds
/// plain text, every plain-text content is wrapped as a single text part
/// (part sequences pass through untouched); when none does, the transcript
/// is returned unchanged. A plain model takes text: every part sequence is
/// flattened to its first text part, empty when it has none.
///
/// Always builds new messages; the caller's transcript is never mutated.
pub fn format_message_content(messages: &[ChatMessage], model: &str) -> Vec<ChatMessage> {
    if is_multimodal_model(model) {
        if !includes_text_content(messages) {
            return messages.to_vec();
        }
        messages
            .iter()
            .map(|message| {
                let content = match &message.content {
                    MessageContent::Text(text) => {
                        MessageContent::Parts(vec![ContentPart::text(text.clone())])
                    }
                    MessageContent::Parts(parts) => MessageContent::Parts(parts.clone()),
                };
                rebuild(message, content)
            })
            .collect()
    } else {
        messages
            .iter()
            .map(|message| {
                let text = message.content.first_text().unwrap_or_default().to_string();
                rebuild(message, MessageContent::Text(text))
            })
            .collect()
    }
}

fn rebuild(message: &ChatMessage, content: MessageContent) -> ChatMessage {
    ChatMessage {
        role: message.role,
        content,
        name: message.name.clone(),
    }
}

fn includes_text_content(messages: &[ChatMessage]) -> bool {
    messages.iter().any(|message| message.content.is_text())
}

/// Decode one requested tool call into an action.
///
/// A malformed argument payload is logged and replaced with an empty
/// argument set; a single bad call must never abort the whole response.
pub fn to_action(tool_call: &ToolCallPayload) -> Action {
    let arguments = if tool_call.function.arguments.is_empty() {
        Value::Object(Map::new())
    } else {
        match serde_json::from_str(&tool_call.function.arguments) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    arguments = %tool_call.function.arguments,
                    "could not parse tool arguments"
                );
                Value::Object(Map::new())
            }
        }
    };
    Action::new(tool_call.function.name.clone(), arguments)
}
