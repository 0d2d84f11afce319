//! Receipt Text Extraction Library
//!
//! Extracts structured records (merchant, date, line items, totals) from
//! free-form receipt text using two independent strategies:
//!
//! - **pattern**: deterministic regex matching against a fixed
//!   line/label layout; free, fast, never fails, English-only.
//! - **model**: a hosted language model behind the [`CompletionModel`]
//!   trait; flexible but costs tokens and can fail.
//!
//! The strategies compose under a fallback policy (auto mode prefers the
//! model, falls back to pattern on recoverable failure) and a comparison
//! mode that reports field-level agreement between the two.
//!
//! # Usage
//!
//! ```rust,ignore
//! use receipts::{AnthropicModel, ModelCredentials, ReceiptPipeline};
//!
//! let creds = ModelCredentials::new(api_key, "claude-sonnet-4-20250514");
//! let pipeline = ReceiptPipeline::new(AnthropicModel::new(creds));
//!
//! let extracted = pipeline.extract_auto(receipt_text).await?;
//! println!("{} via {}", extracted.record.merchant.unwrap_or_default(),
//!     extracted.record.source_strategy);
//! ```
//!
//! # Modules
//!
//! - [`types`] - The canonical record, usage, and comparison types
//! - [`pattern`] - Deterministic pattern extractor
//! - [`model`] - Model extractor and reply parsing
//! - [`pipeline`] - Mode selection, fallback, comparison
//! - [`traits`] - The completion-model seam
//! - [`security`] - Credential handling
//! - [`testing`] - Mock model for tests

pub mod error;
pub mod model;
pub mod pattern;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "anthropic")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ExtractError, Result};
pub use model::ModelExtractor;
pub use pattern::PatternExtractor;
pub use pipeline::{
    compare, compose_fallback, CompareBothOutcome, Extracted, ExtractionMode, ReceiptPipeline,
};
pub use security::{ModelCredentials, SecretString};
pub use traits::{Completion, CompletionModel};
pub use types::{
    ComparisonReport, ItemCounts, LineItem, ReceiptRecord, SourceStrategy, UsageStats,
};

#[cfg(feature = "anthropic")]
pub use ai::AnthropicModel;
