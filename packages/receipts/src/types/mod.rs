//! Core data types shared by every extraction strategy.

pub mod comparison;
pub mod receipt;
pub mod usage;

pub use comparison::{ComparisonReport, ItemCounts};
pub use receipt::{LineItem, ReceiptRecord, SourceStrategy};
pub use usage::UsageStats;
