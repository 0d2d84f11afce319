//! The canonical structured receipt shape produced by every strategy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which extraction strategy produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStrategy {
    /// Deterministic pattern matching
    Pattern,

    /// Hosted language model
    Model,

    /// Model strategy failed, pattern strategy supplied the record
    ModelFallbackToPattern,
}

impl fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pattern => "pattern",
            Self::Model => "model",
            Self::ModelFallbackToPattern => "model_fallback_to_pattern",
        };
        f.write_str(name)
    }
}

/// One purchased line item.
///
/// `amount` is a non-negative decimal; the extractors only ever produce
/// two-decimal values from `$X.XX` text or model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// What was purchased
    pub description: String,

    /// Price for this line
    pub amount: Decimal,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// A structured receipt, the canonical output of every strategy.
///
/// Absent fields are `None`, never a sentinel value; zero means the
/// receipt really said zero. `items` preserves the order of appearance in
/// the source text. A record is built whole by one extraction call and
/// never mutated afterward; [`ReceiptRecord::with_strategy`] produces a
/// retagged copy for the fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Presumed business name
    pub merchant: Option<String>,

    /// Date as it appeared in the text, not normalized
    pub date: Option<String>,

    /// Invoice or receipt number
    pub invoice_number: Option<String>,

    /// Purchased items, in order of appearance
    pub items: Vec<LineItem>,

    /// Pre-tax total
    pub subtotal: Option<Decimal>,

    /// Tax amount
    pub tax: Option<Decimal>,

    /// Grand total
    pub total: Option<Decimal>,

    /// Which strategy produced this record
    pub source_strategy: SourceStrategy,
}

impl ReceiptRecord {
    /// An all-absent record tagged with the given strategy.
    pub fn empty(source_strategy: SourceStrategy) -> Self {
        Self {
            merchant: None,
            date: None,
            invoice_number: None,
            items: Vec::new(),
            subtotal: None,
            tax: None,
            total: None,
            source_strategy,
        }
    }

    /// Retag this record with a different source strategy.
    pub fn with_strategy(mut self, source_strategy: SourceStrategy) -> Self {
        self.source_strategy = source_strategy;
        self
    }
}
