//! Token-usage accounting for model-based extractions.

use serde::{Deserialize, Serialize};

/// Token consumption for one model call.
///
/// Produced alongside a record by the model strategy, consumed by callers
/// for cost accounting. The pattern strategy never reports usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Tokens in the prompt
    pub input_tokens: u64,

    /// Tokens in the model reply
    pub output_tokens: u64,

    /// Sum of input and output tokens
    pub total_tokens: u64,
}

impl UsageStats {
    /// Build usage stats from the counts a model response reports.
    pub fn from_counts(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_input_and_output() {
        let usage = UsageStats::from_counts(120, 34);
        assert_eq!(usage.total_tokens, 154);
    }
}
