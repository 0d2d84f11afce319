//! Anthropic implementation of the completion trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use receipts::{AnthropicModel, ModelCredentials, ReceiptPipeline};
//!
//! let creds = ModelCredentials::new("sk-ant-...", "claude-sonnet-4-20250514");
//! let pipeline = ReceiptPipeline::new(AnthropicModel::new(creds));
//! ```

use anthropic_client::{AnthropicClient, AnthropicError, Message, MessagesRequest};
use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::security::ModelCredentials;
use crate::traits::{Completion, CompletionModel};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Completion model backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicModel {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicModel {
    /// Create a model from explicit credentials.
    ///
    /// The credential is required here, before any network call; there is
    /// no lazy lookup at extraction time.
    pub fn new(credentials: ModelCredentials) -> Self {
        let mut client = AnthropicClient::new(credentials.api_key.expose());
        if let Some(url) = credentials.base_url {
            client = client.with_base_url(url);
        }
        Self {
            client,
            model: credentials.model,
            max_tokens: 1024,
        }
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// Convenience for binaries; library callers should prefer
    /// [`AnthropicModel::new`] with injected credentials.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ExtractError::Config("ANTHROPIC_API_KEY not set".into()))?;
        Ok(Self::new(ModelCredentials::new(api_key, DEFAULT_MODEL)))
    }

    /// Set the reply token budget (default: 1024).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionModel for AnthropicModel {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let request = MessagesRequest::new(&self.model)
            .max_tokens(self.max_tokens)
            .message(Message::user(prompt));

        let response = self.client.messages(request).await.map_err(map_error)?;

        Ok(Completion {
            text: response.text(),
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
        })
    }
}

fn map_error(err: AnthropicError) -> ExtractError {
    match err {
        AnthropicError::Config(msg) => ExtractError::Config(msg),
        // API-envelope parse failures are transport problems, not a
        // malformed model reply
        AnthropicError::Network(_) | AnthropicError::Api(_) | AnthropicError::Parse(_) => {
            ExtractError::Transport(Box::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_applies_credentials() {
        let creds = ModelCredentials::new("sk-ant-test", DEFAULT_MODEL)
            .with_base_url("https://gateway.example.com");
        let model = AnthropicModel::new(creds).with_max_tokens(2048);

        assert_eq!(model.model(), DEFAULT_MODEL);
        assert_eq!(model.max_tokens, 2048);
        assert_eq!(model.client.base_url(), "https://gateway.example.com");
    }

    #[test]
    fn test_config_errors_stay_config() {
        let err = map_error(AnthropicError::Config("no key".into()));
        assert!(matches!(err, ExtractError::Config(_)));
        assert!(!err.is_fallback_eligible());
    }

    #[test]
    fn test_api_errors_become_transport() {
        let err = map_error(AnthropicError::Api("overloaded".into()));
        assert!(matches!(err, ExtractError::Transport(_)));
        assert!(err.is_fallback_eligible());
    }
}
