//! These models represent the objects passed between the conversation layer
//! and the model protocol client.
//!
//! Messages are provider-agnostic at rest: content is either plain text or
//! an ordered sequence of typed parts, and is only rewritten into the shape
//! a specific model expects at the protocol boundary. The result of a
//! protocol call always comes back as a [`thought::Thought`], a closed sum
//! over the three possible outcomes.
pub mod content;
pub mod message;
pub mod role;
pub mod thought;
pub mod tool;
