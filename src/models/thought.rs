use std::fmt;

use futures::stream::BoxStream;
use futures::StreamExt;

use super::tool::Action;
use crate::errors::ProviderError;
use crate::providers::utils::ChatCompletionChunk;

/// Incremental protocol chunks as produced by a streaming completion
pub type CompletionStream = BoxStream<'static, Result<ChatCompletionChunk, ProviderError>>;

/// The outcome of one protocol call: a final message, a lazily streamed
/// response, or the model's request to invoke tools.
///
/// Exactly one variant is populated per call. A `Stream` thought is a
/// single-pass lazy sequence; once drained it cannot be replayed.
pub enum Thought {
    Message(String),
    Stream(CompletionStream),
    Actions(Vec<Action>),
}

impl Thought {
    /// Get the final text if this is a Message variant
    pub fn message(&self) -> Option<&str> {
        match self {
            Thought::Message(text) => Some(text),
            _ => None,
        }
    }

    /// Get the requested actions if this is an Actions variant
    pub fn actions(&self) -> Option<&[Action]> {
        match self {
            Thought::Actions(actions) => Some(actions),
            _ => None,
        }
    }

    /// Consume a Stream variant into its underlying chunk stream
    pub fn into_stream(self) -> Option<CompletionStream> {
        match self {
            Thought::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    /// Consume a Stream variant into a stream of text fragments, one per
    /// chunk that carries delta content
    pub fn into_text_stream(self) -> Option<BoxStream<'static, Result<String, ProviderError>>> {
        let stream = self.into_stream()?;
        Some(
            stream
                .filter_map(|next| async move {
                    match next {
                        Ok(chunk) => chunk
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.delta.content)
                            .filter(|text| !text.is_empty())
                            .map(Ok),
                        Err(e) => Some(Err(e)),
                    }
                })
                .boxed(),
        )
    }
}

impl fmt::Debug for Thought {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thought::Message(text) => f.debug_tuple("Message").field(text).finish(),
            Thought::Stream(_) => f.write_str("Stream(..)"),
            Thought::Actions(actions) => f.debug_tuple("Actions").field(actions).finish(),
        }
    }
}
