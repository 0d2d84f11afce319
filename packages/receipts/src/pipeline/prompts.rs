//! Prompts for the model extraction strategy.

/// Single-turn prompt instructing the model to reply with the fixed
/// receipt schema as bare JSON. `{receipt_text}` is substituted by
/// [`format_extract_prompt`].
pub const EXTRACT_RECEIPT_PROMPT: &str = r#"Extract structured data from this receipt and return ONLY valid JSON.

Required fields:
- merchant: string
- date: string (YYYY-MM-DD format if possible)
- invoice_number: string or null
- items: array of objects with description and amount
- subtotal: number or null
- tax: number or null
- total: number

Receipt text:
{receipt_text}

Important: Return ONLY the JSON object, no markdown, no explanations."#;

/// Substitute the receipt text into the extraction prompt.
pub fn format_extract_prompt(receipt_text: &str) -> String {
    EXTRACT_RECEIPT_PROMPT.replace("{receipt_text}", receipt_text)
}
