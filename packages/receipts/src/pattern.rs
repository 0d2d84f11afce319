//! Deterministic pattern-based receipt extraction.
//!
//! Works against a fixed line/label layout: merchant on the first
//! non-blank line, `Label: value` pairs, dash-bulleted items with a
//! three-dot separator before the amount. Only reliable for structured
//! English receipts; the model strategy covers everything else.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::types::{LineItem, ReceiptRecord, SourceStrategy};

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Date:\s*(.+)").unwrap());
static RE_INVOICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Invoice #:\s*(.+)").unwrap());
static RE_TOTAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"TOTAL:\s*\$(\d+\.\d+)").unwrap());
static RE_SUBTOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Subtotal:\s*\$(\d+\.\d+)").unwrap());
static RE_TAX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Tax.*?:\s*\$(\d+\.\d+)").unwrap());
static RE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s*(.+?)\s*\.\.\.\s*\$(\d+\.\d+)").unwrap());

/// Deterministic receipt extractor.
///
/// Pure and total: every field degrades independently to `None` on
/// malformed or missing input, so extraction never fails, including for
/// the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    /// Create a new pattern extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract a structured record from receipt text.
    pub fn extract(&self, text: &str) -> ReceiptRecord {
        let mut record = ReceiptRecord::empty(SourceStrategy::Pattern);

        // Merchant: first non-blank line
        record.merchant = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(String::from);

        record.date = capture_text(&RE_DATE, text);
        record.invoice_number = capture_text(&RE_INVOICE, text);
        record.total = capture_amount(&RE_TOTAL, text);
        record.subtotal = capture_amount(&RE_SUBTOTAL, text);
        record.tax = capture_amount(&RE_TAX, text);

        // Bulleted lines missing the `... $X.XX` tail are skipped, not errors
        for line in text.lines() {
            if !line.trim_start().starts_with('-') {
                continue;
            }
            if let Some(caps) = RE_ITEM.captures(line) {
                if let Ok(amount) = Decimal::from_str(&caps[2]) {
                    record.items.push(LineItem::new(caps[1].trim(), amount));
                }
            }
        }

        record
    }
}

/// First capture group of the first match, trimmed; `None` if no match.
fn capture_text(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// First capture group parsed as a decimal; parse failure is absence.
fn capture_amount(re: &Regex, text: &str) -> Option<Decimal> {
    re.captures(text)
        .and_then(|caps| Decimal::from_str(&caps[1]).ok())
}
