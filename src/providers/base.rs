use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::message::ChatMessage;
use crate::models::thought::Thought;
use crate::models::tool::ToolDefinition;

/// Requested body format for a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Text,
    JsonObject,
}

/// Capability trait for chat model backends.
///
/// Both operations take the transcript as-is and return a [`Thought`];
/// appending the outcome back into a conversation is the caller's job.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Ask the model to complete the given transcript. `use_multimodal`
    /// selects the multimodal model; content normalization follows the
    /// resolved model's classification, not the flag alone.
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        stream: bool,
        use_multimodal: bool,
        response_type: ResponseType,
    ) -> Result<Thought>;

    /// Ask the model to pick tool invocations for the given transcript,
    /// advertising the compiled tool descriptors
    async fn tools_call(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        stream: bool,
    ) -> Result<Thought>;
}
