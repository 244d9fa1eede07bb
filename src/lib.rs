//! Transcript bookkeeping and a chat-model protocol client for LLM agents.
//!
//! The crate has two tightly coupled halves. [`conversation`] owns the
//! authoritative ordered transcript of a chat session and a derived index
//! pairing each user turn with the assistant turn that answers it.
//! [`providers`] speaks the remote chat-completion protocol: it normalizes
//! message content to what the resolved model accepts, issues streaming or
//! non-streaming requests, detects tool-call responses, and hands every
//! outcome back as a [`models::thought::Thought`].
//!
//! Orchestration — deciding which tool to run for a goal, retry policy,
//! rendering — lives above this crate.
pub mod conversation;
pub mod errors;
pub mod models;
pub mod providers;
