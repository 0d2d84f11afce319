//! Integration tests for the extraction pipeline.
//!
//! These exercise the full strategy flow: mode selection, the model
//! round trip (mocked), fallback composition, and cross-strategy
//! comparison.

use receipts::{
    testing::MockModel, ExtractError, ReceiptPipeline, SourceStrategy,
};

const ACME_RECEIPT: &str = "ACME Office Supplies\n\
    Date: 2024-01-15\n\
    Invoice #: INV-2024-001\n\
    - Paper ... $45.00\n\
    Subtotal: $45.00\n\
    Tax: $3.60\n\
    TOTAL: $48.60";

const ACME_MODEL_REPLY: &str = r#"{
    "merchant": "ACME Office Supplies",
    "date": "2024-01-15",
    "invoice_number": "INV-2024-001",
    "items": [{"description": "Paper", "amount": 45.00}],
    "subtotal": 45.00,
    "tax": 3.60,
    "total": 48.60
}"#;

#[tokio::test]
async fn auto_mode_uses_model_when_it_succeeds() {
    let mock = MockModel::new().with_reply(ACME_MODEL_REPLY);
    let pipeline = ReceiptPipeline::new(mock.clone());

    let extracted = pipeline.extract_auto(ACME_RECEIPT).await.unwrap();

    assert_eq!(extracted.record.source_strategy, SourceStrategy::Model);
    assert_eq!(
        extracted.record.merchant.as_deref(),
        Some("ACME Office Supplies")
    );
    let usage = extracted.usage.expect("model path reports usage");
    assert_eq!(usage.total_tokens, usage.input_tokens + usage.output_tokens);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn auto_mode_falls_back_when_model_fails() {
    let mock = MockModel::new().with_transport_error("api unreachable");
    let pipeline = ReceiptPipeline::new(mock.clone());

    let extracted = pipeline.extract_auto(ACME_RECEIPT).await.unwrap();

    // Same record the pattern strategy would produce, retagged
    let expected = pipeline
        .extract_pattern(ACME_RECEIPT)
        .with_strategy(SourceStrategy::ModelFallbackToPattern);
    assert_eq!(extracted.record, expected);
    assert!(extracted.usage.is_none());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn auto_mode_falls_back_on_malformed_model_reply() {
    let mock = MockModel::new().with_reply("Sorry, I cannot parse this receipt.");
    let pipeline = ReceiptPipeline::new(mock);

    let extracted = pipeline.extract_auto(ACME_RECEIPT).await.unwrap();
    assert_eq!(
        extracted.record.source_strategy,
        SourceStrategy::ModelFallbackToPattern
    );
}

#[tokio::test]
async fn auto_mode_propagates_config_errors() {
    let mock = MockModel::new().with_config_error("credential missing");
    let pipeline = ReceiptPipeline::new(mock);

    let err = pipeline.extract_auto(ACME_RECEIPT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Config(_)));
}

#[tokio::test]
async fn model_mode_does_not_fall_back() {
    let mock = MockModel::new().with_transport_error("api unreachable");
    let pipeline = ReceiptPipeline::new(mock);

    let err = pipeline.extract_model(ACME_RECEIPT).await.unwrap_err();
    assert!(matches!(err, ExtractError::Transport(_)));
}

#[tokio::test]
async fn compare_both_reports_agreement_when_strategies_agree() {
    let mock = MockModel::new().with_reply(ACME_MODEL_REPLY);
    let pipeline = ReceiptPipeline::new(mock);

    let outcome = pipeline.compare_both(ACME_RECEIPT).await;

    assert_eq!(outcome.pattern.source_strategy, SourceStrategy::Pattern);
    let (model_record, usage) = outcome.model.unwrap();
    assert_eq!(model_record.source_strategy, SourceStrategy::Model);
    assert!(usage.total_tokens > 0);

    let comparison = outcome.comparison.expect("both strategies succeeded");
    assert!(comparison.merchant_match);
    assert!(comparison.total_match);
    assert_eq!(comparison.items_count.pattern, 1);
    assert_eq!(comparison.items_count.model, 1);
}

#[tokio::test]
async fn compare_both_reports_disagreement() {
    let reply = r#"{"merchant": "Acme office supplies", "total": 48.61, "items": []}"#;
    let mock = MockModel::new().with_reply(reply);
    let pipeline = ReceiptPipeline::new(mock);

    let outcome = pipeline.compare_both(ACME_RECEIPT).await;
    let comparison = outcome.comparison.unwrap();

    assert!(!comparison.merchant_match);
    assert!(!comparison.total_match);
    assert_eq!(comparison.items_count.pattern, 1);
    assert_eq!(comparison.items_count.model, 0);
}

#[tokio::test]
async fn compare_both_still_returns_pattern_side_when_model_fails() {
    let mock = MockModel::new().with_transport_error("api unreachable");
    let pipeline = ReceiptPipeline::new(mock);

    let outcome = pipeline.compare_both(ACME_RECEIPT).await;

    assert_eq!(
        outcome.pattern.merchant.as_deref(),
        Some("ACME Office Supplies")
    );
    assert!(outcome.model.is_err());
    assert!(outcome.comparison.is_none());
}

#[tokio::test]
async fn fenced_model_reply_is_unwrapped() {
    let mock = MockModel::new().with_reply(format!("```json\n{ACME_MODEL_REPLY}\n```"));
    let pipeline = ReceiptPipeline::new(mock);

    let (record, _) = pipeline.extract_model(ACME_RECEIPT).await.unwrap();
    assert_eq!(record.total, Some("48.60".parse().unwrap()));
}
