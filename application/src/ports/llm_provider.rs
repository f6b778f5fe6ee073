//! LLM provider port
//!
//! Defines the interface for requesting one assistant turn from an LLM
//! provider. Providers must not fail for model-level problems that can be
//! represented as text; errors here are transport-level only.

use async_trait::async_trait;
use roundtable_domain::{LlmResponse, Message, ToolDefinition};
use thiserror::Error;

/// Errors that can occur talking to an LLM provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No credentials configured for model '{0}'")]
    MissingCredentials(String),
}

/// Generation parameters for one chat call
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Port for LLM communication
///
/// One operation: given a message history, available tool definitions, and
/// generation parameters, return one assistant turn. The caller owns the
/// message history; the provider holds no conversation state.
#[async_trait]
pub trait LlmProviderPort: Send + Sync {
    /// Request one assistant turn.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        params: &GenerationParams,
    ) -> Result<LlmResponse, ProviderError>;

    /// The model this provider uses when no override is given.
    fn default_model(&self) -> &str;
}
