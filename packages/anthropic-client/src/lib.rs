//! Pure Anthropic Messages REST API client
//!
//! A clean, minimal client for the Anthropic API with no domain-specific
//! logic. Supports single and multi-turn message completions.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::{AnthropicClient, Message, MessagesRequest};
//!
//! let client = AnthropicClient::from_env()?;
//!
//! let response = client
//!     .messages(
//!         MessagesRequest::new("claude-sonnet-4-20250514")
//!             .message(Message::user("Hello!")),
//!     )
//!     .await?;
//!
//! println!("{}", response.text());
//! ```

pub mod error;
pub mod types;

pub use error::{AnthropicError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default API version header value.
const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Pure Anthropic API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AnthropicError::Config("ANTHROPIC_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, gateways, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `anthropic-version` header value.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Message completion.
    ///
    /// Sends one request to the Messages API and returns the reply with
    /// its token usage. No retries are attempted here.
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                AnthropicError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Anthropic API error");
            return Err(AnthropicError::Api(format!(
                "Anthropic API error: {}",
                error_text
            )));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AnthropicError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            input_tokens = messages_response.usage.input_tokens,
            output_tokens = messages_response.usage.output_tokens,
            duration_ms = start.elapsed().as_millis(),
            "Anthropic message completion"
        );

        Ok(messages_response)
    }
}
