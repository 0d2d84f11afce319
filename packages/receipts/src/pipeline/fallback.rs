//! Fallback composition for auto mode.
//!
//! Auto mode prefers the model strategy and falls back to the pattern
//! strategy when the model path fails. Composition is a pure function
//! over the model outcome, so every branch is testable without a network
//! or a runtime.

use tracing::warn;

use crate::error::Result;
use crate::types::{ReceiptRecord, SourceStrategy, UsageStats};

/// Result of a single-strategy extraction: the record plus usage when the
/// model strategy produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// The extracted record
    pub record: ReceiptRecord,

    /// Token usage, present only when the model strategy ran to completion
    pub usage: Option<UsageStats>,
}

/// Compose a model outcome with a pattern fallback.
///
/// The pattern closure runs only after the model path has finished and
/// failed with a recoverable error, keeping the two attempts strictly
/// sequential. Its record is retagged `model_fallback_to_pattern` and
/// carries no usage. Config errors propagate: a missing credential is
/// fatal, not a reason to silently degrade every call.
pub fn compose_fallback(
    model_outcome: Result<(ReceiptRecord, UsageStats)>,
    pattern_fallback: impl FnOnce() -> ReceiptRecord,
) -> Result<Extracted> {
    match model_outcome {
        Ok((record, usage)) => Ok(Extracted {
            record,
            usage: Some(usage),
        }),
        Err(err) if err.is_fallback_eligible() => {
            warn!(error = %err, "model strategy failed, falling back to pattern");
            let record = pattern_fallback().with_strategy(SourceStrategy::ModelFallbackToPattern);
            Ok(Extracted {
                record,
                usage: None,
            })
        }
        Err(err) => Err(err),
    }
}
