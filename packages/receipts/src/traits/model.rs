//! Completion trait for hosted language models.
//!
//! The model strategy only needs one capability: send a prompt, get text
//! back with token counts. Any hosted-model client that can do that is
//! substitutable behind this trait.

use async_trait::async_trait;

use crate::error::Result;

/// A single completion from a hosted model.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw reply text
    pub text: String,

    /// Tokens consumed by the prompt
    pub input_tokens: u64,

    /// Tokens in the reply
    pub output_tokens: u64,
}

/// Structured text completion capability.
///
/// Implementations wrap a specific provider (Anthropic, OpenAI, a local
/// model) and own its credential. One call is one network round trip: no
/// retries, no internal timeout. Callers wrap the future with a deadline
/// if they need one.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Complete a single-turn prompt.
    ///
    /// Transport and API failures propagate unchanged; this trait never
    /// inspects or reshapes the reply text.
    async fn complete(&self, prompt: &str) -> Result<Completion>;
}
