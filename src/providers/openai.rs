use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use super::base::{ModelService, ResponseType};
use super::configs::GptConfig;
use super::fork::fork;
use super::utils::{format_message_content, to_action, ChatCompletionChunk, ChatCompletionResponse};
use crate::errors::ProviderError;
use crate::models::message::ChatMessage;
use crate::models::thought::{CompletionStream, Thought};
use crate::models::tool::ToolDefinition;

/// Protocol client for GPT-style chat completion endpoints.
pub struct GptModelService {
    client: Client,
    config: GptConfig,
}

impl GptModelService {
    pub fn new(config: GptConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GptConfig::from_env()?)
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        )
    }

    async fn post(&self, payload: Value) -> Result<Value> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                // Retry policy is a caller concern
                Err(anyhow!("Server error: {}", status))
            }
            status => Err(anyhow!("Request failed: {}\nPayload: {}", status, payload)),
        }
    }

    async fn post_stream(&self, payload: Value) -> Result<CompletionStream> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Request failed: {}", status));
        }

        let bytes = response
            .bytes_stream()
            .map(|next| next.map_err(|e| ProviderError::Request(e.to_string())));
        Ok(decode_sse(bytes))
    }

    async fn non_stream_tools_call(
        &self,
        messages: &[ChatMessage],
        tools: Vec<Value>,
    ) -> Result<Thought> {
        let payload = json!({
            "model": self.config.tools_call_model,
            "messages": messages,
            "stream": false,
            "tools": tools,
        });

        let response: ChatCompletionResponse = serde_json::from_value(self.post(payload).await?)?;
        let mut actions = Vec::new();
        if let Some(choice) = response.choices.first() {
            match choice.finish_reason.as_deref() {
                Some("tool_calls") => {
                    actions = choice.message.tool_calls.iter().map(to_action).collect();
                }
                // The model answered in prose instead of picking a tool
                Some("stop") if choice.message.content.is_some() => {
                    return Ok(Thought::Message(
                        choice.message.content.clone().unwrap_or_default(),
                    ));
                }
                _ => {}
            }
        }
        Ok(Thought::Actions(actions))
    }

    /// Scan the response stream for a tool-call finish without consuming
    /// the copy handed to the caller.
    ///
    /// The stream is forked; the first copy is inspected chunk by chunk.
    /// A tool-call finish decodes into actions. Any other finish means the
    /// model is answering in prose, so the caller gets the second, still
    /// fully unconsumed copy and sees the response from its beginning,
    /// including the chunks already scanned here.
    async fn stream_tools_call(
        &self,
        messages: &[ChatMessage],
        tools: Vec<Value>,
    ) -> Result<Thought> {
        let payload = json!({
            "model": self.config.tools_call_model,
            "messages": messages,
            "stream": true,
            "tools": tools,
        });

        let chunks = self.post_stream(payload).await?;
        let (mut first, second) = fork(chunks);

        while let Some(next) = first.next().await {
            let chunk = next?;
            if chunk.choices.is_empty() {
                return Err(ProviderError::Protocol("empty choices in chunk".to_string()).into());
            }
            let choice = &chunk.choices[0];
            match choice.finish_reason.as_deref() {
                Some("tool_calls") => {
                    let actions = choice.delta.tool_calls.iter().map(to_action).collect();
                    return Ok(Thought::Actions(actions));
                }
                Some(_) => return Ok(Thought::Stream(Box::pin(second))),
                None => {}
            }
        }

        // Exhausted without a terminal chunk
        Ok(Thought::Actions(Vec::new()))
    }
}

#[async_trait]
impl ModelService for GptModelService {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        stream: bool,
        use_multimodal: bool,
        response_type: ResponseType,
    ) -> Result<Thought> {
        let model = if use_multimodal {
            &self.config.multimodal_model
        } else {
            &self.config.model
        };

        let mut payload = json!({
            "model": model,
            "messages": format_message_content(messages, model),
            "stream": stream,
            "response_format": { "type": response_type },
        });
        if !use_multimodal {
            // Token cap for non multimodal models
            payload
                .as_object_mut()
                .unwrap()
                .insert("max_tokens".to_string(), json!(self.config.max_tokens));
        }

        if stream {
            let chunks = self.post_stream(payload).await?;
            return Ok(Thought::Stream(chunks));
        }

        let response: ChatCompletionResponse = serde_json::from_value(self.post(payload).await?)?;
        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();
        Ok(Thought::Message(text))
    }

    async fn tools_call(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        stream: bool,
    ) -> Result<Thought> {
        let specs: Vec<Value> = tools.iter().map(|tool| tool.to_spec()).collect();
        if stream {
            self.stream_tools_call(messages, specs).await
        } else {
            self.non_stream_tools_call(messages, specs).await
        }
    }
}

/// Decode a `text/event-stream` byte stream into completion chunks.
///
/// Bytes are buffered until a full line is available, so a `data:` line
/// split across network reads still decodes. `data: [DONE]` ends the
/// stream; lines without a `data:` prefix are ignored.
fn decode_sse<B, T>(mut bytes: B) -> CompletionStream
where
    B: Stream<Item = Result<T, ProviderError>> + Send + Unpin + 'static,
    T: AsRef<[u8]> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut buffer: Vec<u8> = Vec::new();
        while let Some(next) = bytes.next().await {
            let data = match next {
                Ok(data) => data,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            buffer.extend_from_slice(data.as_ref());

            while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                if let Some(payload) = line.trim().strip_prefix("data:") {
                    let payload = payload.trim();
                    if payload == "[DONE]" {
                        return;
                    }
                    match serde_json::from_str::<ChatCompletionChunk>(payload) {
                        Ok(chunk) => yield Ok(chunk),
                        Err(e) => yield Err(ProviderError::Decode(e.to_string())),
                    }
                }
            }
        }
    })
}
