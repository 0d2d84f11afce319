//! Field-level agreement between two receipt records.

use serde::{Deserialize, Serialize};

/// Item counts for each side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    /// Items found by the pattern strategy
    pub pattern: usize,

    /// Items found by the model strategy
    pub model: usize,
}

/// Field-level agreement report between two records.
///
/// Merchant and total use exact equality; item agreement is counts only.
/// Item-level reconciliation is deliberately out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Exact text equality of merchants (no normalization)
    pub merchant_match: bool,

    /// Exact decimal equality of totals; absent vs present is a mismatch
    pub total_match: bool,

    /// Item counts per side
    pub items_count: ItemCounts,
}
