use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by the protocol client.
///
/// Variants carry string payloads so the error stays `Clone`: items of a
/// forked response stream are buffered for the second reader, and errors
/// travel inside those items.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Protocol violation: {0}")]
    Protocol(String),

    #[error("Could not decode payload: {0}")]
    Decode(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
