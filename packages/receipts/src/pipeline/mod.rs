//! Strategy selection and composition.
//!
//! The pipeline is the single entry point callers use: pick a mode, get a
//! record (plus usage or comparison metadata). It holds no state between
//! calls and runs nothing in parallel; auto mode finishes the model
//! attempt before the pattern attempt starts.

pub mod compare;
pub mod fallback;
pub mod prompts;

pub use compare::compare;
pub use fallback::{compose_fallback, Extracted};
pub use prompts::{format_extract_prompt, EXTRACT_RECEIPT_PROMPT};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ModelExtractor;
use crate::pattern::PatternExtractor;
use crate::traits::CompletionModel;
use crate::types::{ComparisonReport, ReceiptRecord, UsageStats};

/// How a caller wants a receipt extracted. A closed set; anything else is
/// a caller-side contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Deterministic pattern matching only
    Pattern,

    /// Hosted model only; failures propagate
    Model,

    /// Model first, pattern on recoverable failure
    Auto,

    /// Run both strategies independently and report agreement
    CompareBoth,
}

impl Default for ExtractionMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pattern => "pattern",
            Self::Model => "model",
            Self::Auto => "auto",
            Self::CompareBoth => "compare_both",
        };
        f.write_str(name)
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pattern" => Ok(Self::Pattern),
            "model" => Ok(Self::Model),
            "auto" => Ok(Self::Auto),
            "compare_both" | "compare-both" => Ok(Self::CompareBoth),
            other => Err(format!("unknown extraction mode: {other}")),
        }
    }
}

/// Outcome of running both strategies on the same text.
///
/// Each side fails or succeeds independently; `comparison` is present
/// only when both produced a record. The pattern side is total over
/// strings, so it has no error representation.
#[derive(Debug)]
pub struct CompareBothOutcome {
    /// Pattern strategy record
    pub pattern: ReceiptRecord,

    /// Model strategy outcome with usage on success
    pub model: Result<(ReceiptRecord, UsageStats)>,

    /// Agreement report, when both sides succeeded
    pub comparison: Option<ComparisonReport>,
}

/// The extraction pipeline: both strategies plus their composition.
///
/// Holds no mutable state; concurrent calls are safe as long as the
/// completion model is safe for concurrent use.
pub struct ReceiptPipeline<M> {
    pattern: PatternExtractor,
    model: ModelExtractor<M>,
}

impl<M: CompletionModel> ReceiptPipeline<M> {
    /// Create a pipeline over the given completion model.
    pub fn new(model: M) -> Self {
        Self {
            pattern: PatternExtractor::new(),
            model: ModelExtractor::new(model),
        }
    }

    /// Pattern strategy: deterministic, no I/O, never fails.
    pub fn extract_pattern(&self, text: &str) -> ReceiptRecord {
        self.pattern.extract(text)
    }

    /// Model strategy: one network round trip, failures propagate.
    pub async fn extract_model(&self, text: &str) -> Result<(ReceiptRecord, UsageStats)> {
        self.model.extract(text).await
    }

    /// Auto mode: model first, pattern fallback on recoverable failure.
    pub async fn extract_auto(&self, text: &str) -> Result<Extracted> {
        let model_outcome = self.model.extract(text).await;
        compose_fallback(model_outcome, || self.pattern.extract(text))
    }

    /// Compare-both mode: run each strategy independently, then report
    /// agreement when both succeeded.
    pub async fn compare_both(&self, text: &str) -> CompareBothOutcome {
        let model = self.model.extract(text).await;
        let pattern = self.pattern.extract(text);

        let comparison = model
            .as_ref()
            .ok()
            .map(|(model_record, _)| compare(&pattern, model_record));

        CompareBothOutcome {
            pattern,
            model,
            comparison,
        }
    }
}
