use anyhow::{anyhow, Result};

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Connection and model-selection settings for the GPT backend.
///
/// Three named models serve different calls: `model` for plain
/// completions, `multimodal_model` when the caller asks for multimodal
/// handling, and `tools_call_model` for every tools call.
#[derive(Debug, Clone)]
pub struct GptConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub tools_call_model: String,
    pub multimodal_model: String,
    /// Token cap for non-multimodal requests; multimodal requests are sent
    /// uncapped
    pub max_tokens: u32,
}

impl GptConfig {
    pub fn new<H, K>(host: H, api_key: K, model: &str) -> Self
    where
        H: Into<String>,
        K: Into<String>,
    {
        GptConfig {
            host: host.into(),
            api_key: api_key.into(),
            model: model.to_string(),
            tools_call_model: model.to_string(),
            multimodal_model: model.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create a config from environment variables. `OPENAI_API_KEY` is
    /// required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("OPENAI_API_KEY").map_err(|_| anyhow!("OPENAI_API_KEY is not set"))?;
        let host =
            std::env::var("OPENAI_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string());
        let tools_call_model =
            std::env::var("OPENAI_TOOLS_CALL_MODEL").unwrap_or_else(|_| model.clone());
        let multimodal_model =
            std::env::var("OPENAI_MULTIMODAL_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(GptConfig {
            host,
            api_key,
            model,
            tools_call_model,
            multimodal_model,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn with_tools_call_model<S: Into<String>>(mut self, model: S) -> Self {
        self.tools_call_model = model.into();
        self
    }

    pub fn with_multimodal_model<S: Into<String>>(mut self, model: S) -> Self {
        self.multimodal_model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
