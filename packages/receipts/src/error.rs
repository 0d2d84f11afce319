//! Typed errors for the receipt extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during receipt extraction.
///
/// The pattern strategy is total over strings and never produces one of
/// these; every variant originates on the model path.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Missing or invalid model credential. Fatal: never recovered from
    /// inside the library, not even in auto mode.
    #[error("config error: {0}")]
    Config(String),

    /// Network or API failure calling the hosted model. Not retried here;
    /// auto mode converts it into a pattern-strategy attempt.
    #[error("model transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model reply is not valid JSON, or is valid JSON that is not an
    /// object. Treated like a transport failure for fallback purposes.
    #[error("model reply has unexpected shape: {0}")]
    ResponseShape(String),
}

impl ExtractError {
    /// Whether auto mode may recover from this error by running the
    /// pattern strategy instead.
    ///
    /// Config errors are fatal: a missing credential will not fix itself
    /// and silently degrading every call to the pattern strategy would
    /// mask the misconfiguration.
    pub fn is_fallback_eligible(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Transport(_) | Self::ResponseShape(_) => true,
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
