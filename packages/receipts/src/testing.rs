//! Testing utilities including a mock completion model.
//!
//! Useful for testing applications that use the pipeline without making
//! real model calls.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::traits::{Completion, CompletionModel};

/// A scripted reply for one mock call.
#[derive(Debug, Clone)]
enum MockReply {
    /// Succeed with this reply text
    Text(String),

    /// Fail with a transport error
    TransportError(String),

    /// Fail with a config error
    ConfigError(String),
}

/// A mock completion model for testing.
///
/// Replies are scripted in order with the `with_*` builders; each call
/// consumes one. A call past the end of the script fails with a
/// transport error. Prompts are recorded for assertions.
#[derive(Default, Clone)]
pub struct MockModel {
    script: Arc<RwLock<VecDeque<MockReply>>>,
    calls: Arc<RwLock<Vec<String>>>,
    input_tokens: u64,
    output_tokens: u64,
}

impl MockModel {
    /// Create a new mock with default token counts (100 in, 25 out).
    pub fn new() -> Self {
        Self {
            input_tokens: 100,
            output_tokens: 25,
            ..Default::default()
        }
    }

    /// Script a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Script a transport failure.
    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(MockReply::TransportError(message.into()));
        self
    }

    /// Script a config failure.
    pub fn with_config_error(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(MockReply::ConfigError(message.into()));
        self
    }

    /// Set the token counts reported with successful replies.
    pub fn with_usage(mut self, input_tokens: u64, output_tokens: u64) -> Self {
        self.input_tokens = input_tokens;
        self.output_tokens = output_tokens;
        self
    }

    /// All prompts this mock has received.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        self.calls.write().unwrap().push(prompt.to_string());

        let reply = self.script.write().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(Completion {
                text,
                input_tokens: self.input_tokens,
                output_tokens: self.output_tokens,
            }),
            Some(MockReply::TransportError(message)) => {
                Err(ExtractError::Transport(message.into()))
            }
            Some(MockReply::ConfigError(message)) => Err(ExtractError::Config(message)),
            None => Err(ExtractError::Transport(
                "mock model has no scripted reply".into(),
            )),
        }
    }
}
