//! Anthropic Messages API request and response types.

use serde::{Deserialize, Serialize};

/// Messages API request.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Optional system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Sampling temperature (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl MessagesRequest {
    /// Create a new request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 1024,
            messages: Vec::new(),
            system: None,
            temperature: None,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the system prompt.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "user" or "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Messages API response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Response content blocks
    pub content: Vec<ContentBlock>,

    /// Token usage for this call
    pub usage: Usage,

    /// Why generation stopped ("end_turn", "max_tokens", ...)
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessagesResponse {
    /// Concatenated text of all text content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// A single content block in a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text block
    Text { text: String },

    /// Any block type this client does not model (tool use, thinking, ...)
    #[serde(other)]
    Other,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub input_tokens: u64,

    /// Tokens in the generated reply
    pub output_tokens: u64,
}
