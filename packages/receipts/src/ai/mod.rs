//! Concrete model implementations.
//!
//! Enabled with the `anthropic` feature. Applications that bring their
//! own provider only need to implement [`crate::traits::CompletionModel`].

mod anthropic;

pub use anthropic::AnthropicModel;
