//! Model-based receipt extraction.
//!
//! Delegates extraction to a hosted language model behind the
//! [`CompletionModel`] trait: build the prompt, make one call, unwrap an
//! optional code fence, parse the JSON reply into a [`ReceiptRecord`].
//! No retries and no internal timeout; transport failures propagate
//! unchanged to the caller.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::pipeline::prompts::format_extract_prompt;
use crate::traits::CompletionModel;
use crate::types::{LineItem, ReceiptRecord, SourceStrategy, UsageStats};

// Fenced body with an optional language tag, non-greedy so trailing prose
// after the closing fence is ignored.
static RE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```").unwrap());

/// Receipt extractor backed by a hosted language model.
pub struct ModelExtractor<M> {
    model: M,
}

impl<M: CompletionModel> ModelExtractor<M> {
    /// Create a new model extractor over the given completion model.
    ///
    /// The model carries its own credential; a missing credential fails
    /// when the concrete model is constructed, before any extraction.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Extract a structured record from receipt text.
    ///
    /// One network round trip. Returns the record tagged `model` together
    /// with the token usage the model reported for this call.
    pub async fn extract(&self, text: &str) -> Result<(ReceiptRecord, UsageStats)> {
        let prompt = format_extract_prompt(text);
        let completion = self.model.complete(&prompt).await?;

        let record = parse_model_reply(&completion.text)?;
        let usage = UsageStats::from_counts(completion.input_tokens, completion.output_tokens);

        debug!(
            items = record.items.len(),
            total_tokens = usage.total_tokens,
            "model extraction complete"
        );

        Ok((record, usage))
    }
}

/// Strip a wrapping markdown code fence from a model reply.
///
/// Models sometimes fence their JSON despite being told not to. If the
/// trimmed reply starts with a fence marker, the fenced body is
/// extracted; otherwise (or when the fence never closes) the trimmed
/// reply is returned as-is and JSON parsing decides its fate.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    if trimmed.starts_with("```") {
        if let Some(caps) = RE_FENCE.captures(trimmed) {
            return caps.get(1).map(|m| m.as_str()).unwrap_or(trimmed);
        }
    }
    trimmed
}

/// Loosely-shaped reply schema. Every field is optional so a model that
/// omits one degrades to absence instead of failing the parse; numeric
/// coercion is the model's responsibility.
#[derive(Debug, Deserialize)]
struct ModelReceiptReply {
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    invoice_number: Option<String>,
    #[serde(default)]
    items: Vec<ModelLineItem>,
    #[serde(default)]
    subtotal: Option<Decimal>,
    #[serde(default)]
    tax: Option<Decimal>,
    #[serde(default)]
    total: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct ModelLineItem {
    description: String,
    amount: Decimal,
}

/// Parse a model reply into a record tagged `model`.
///
/// Invalid JSON, or valid JSON that is not an object, is a
/// [`ExtractError::ResponseShape`] error; it is never silently
/// downgraded to an empty record.
pub fn parse_model_reply(reply: &str) -> Result<ReceiptRecord> {
    let body = strip_code_fence(reply);

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ExtractError::ResponseShape(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(ExtractError::ResponseShape(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }

    let parsed: ModelReceiptReply = serde_json::from_value(value)
        .map_err(|e| ExtractError::ResponseShape(format!("unexpected field shape: {e}")))?;

    Ok(ReceiptRecord {
        merchant: parsed.merchant,
        date: parsed.date,
        invoice_number: parsed.invoice_number,
        items: parsed
            .items
            .into_iter()
            .map(|item| LineItem::new(item.description, item.amount))
            .collect(),
        subtotal: parsed.subtotal,
        tax: parsed.tax,
        total: parsed.total,
        source_strategy: SourceStrategy::Model,
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
