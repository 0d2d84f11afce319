//! Cross-strategy agreement checking.

use crate::types::{ComparisonReport, ItemCounts, ReceiptRecord};

/// Compare two records field by field.
///
/// Merchant uses exact text equality (case and whitespace differences are
/// mismatches) and total uses exact decimal equality; `None` compared to
/// `Some` is a mismatch for both. Items are compared by count only, never
/// reconciled line by line.
pub fn compare(pattern: &ReceiptRecord, model: &ReceiptRecord) -> ComparisonReport {
    ComparisonReport {
        merchant_match: pattern.merchant == model.merchant,
        total_match: pattern.total == model.total,
        items_count: ItemCounts {
            pattern: pattern.items.len(),
            model: model.items.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, SourceStrategy};

    fn record(merchant: Option<&str>, total: Option<&str>, items: usize) -> ReceiptRecord {
        let mut r = ReceiptRecord::empty(SourceStrategy::Pattern);
        r.merchant = merchant.map(String::from);
        r.total = total.map(|t| t.parse().unwrap());
        r.items = (0..items)
            .map(|i| LineItem::new(format!("item {i}"), "1.00".parse().unwrap()))
            .collect();
        r
    }

    #[test]
    fn test_comparison_is_reflexive() {
        let r = record(Some("ACME"), Some("48.60"), 3);
        let report = compare(&r, &r);

        assert!(report.merchant_match);
        assert!(report.total_match);
        assert_eq!(report.items_count.pattern, report.items_count.model);
    }

    #[test]
    fn test_merchant_comparison_has_no_normalization() {
        let a = record(Some("ACME"), None, 0);
        let b = record(Some("acme"), None, 0);
        assert!(!compare(&a, &b).merchant_match);

        let c = record(Some("ACME "), None, 0);
        assert!(!compare(&a, &c).merchant_match);
    }

    #[test]
    fn test_absent_total_vs_present_is_mismatch() {
        let a = record(None, Some("48.60"), 0);
        let b = record(None, None, 0);
        assert!(!compare(&a, &b).total_match);
    }

    #[test]
    fn test_both_totals_absent_match() {
        let a = record(Some("A"), None, 0);
        let b = record(Some("A"), None, 0);
        assert!(compare(&a, &b).total_match);
    }

    #[test]
    fn test_totals_compare_by_value_not_scale() {
        // 48.6 from a model float reply equals 48.60 from pattern text
        let a = record(None, Some("48.60"), 0);
        let b = record(None, Some("48.6"), 0);
        assert!(compare(&a, &b).total_match);
    }

    #[test]
    fn test_item_counts_are_reported_per_side() {
        let a = record(None, None, 2);
        let b = record(None, None, 5);
        let report = compare(&a, &b);
        assert_eq!(report.items_count.pattern, 2);
        assert_eq!(report.items_count.model, 5);
    }
}
