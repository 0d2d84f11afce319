//! Manual test harness: run the extraction strategies against receipt
//! text files and eyeball the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use receipts::{
    AnthropicModel, Extracted, PatternExtractor, ReceiptPipeline, ReceiptRecord, UsageStats,
};

#[derive(Parser)]
#[command(name = "receipt-cli", about = "Parse receipt text files")]
struct Args {
    /// Receipt text file(s) to parse
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Which strategy to run
    #[arg(long, value_enum, default_value = "compare")]
    mode: Mode,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum Mode {
    /// Pattern matching only (no API key needed)
    Pattern,
    /// Hosted model only
    Model,
    /// Model with pattern fallback
    Auto,
    /// Run both and compare
    Compare,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    // Pattern mode needs no credential; everything else does
    let pipeline = match args.mode {
        Mode::Pattern => None,
        _ => Some(ReceiptPipeline::new(
            AnthropicModel::from_env().context("model strategy needs ANTHROPIC_API_KEY")?,
        )),
    };

    let mut failures = 0;
    for file in &args.files {
        println!();
        println!("{}", "=".repeat(70));
        println!("📄 {}", file.display().to_string().bold());
        println!("{}", "=".repeat(70));

        let text = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;

        match (args.mode, &pipeline) {
            (Mode::Pattern, _) => {
                print_record("PATTERN", &PatternExtractor::new().extract(&text), None);
            }
            (Mode::Model, Some(pipeline)) => match pipeline.extract_model(&text).await {
                Ok((record, usage)) => print_record("MODEL", &record, Some(usage)),
                Err(e) => {
                    println!("{} {}", "❌ Model failed:".red(), e);
                    failures += 1;
                }
            },
            (Mode::Auto, Some(pipeline)) => match pipeline.extract_auto(&text).await {
                Ok(Extracted { record, usage }) => {
                    print_record(&record.source_strategy.to_string().to_uppercase(), &record, usage)
                }
                Err(e) => {
                    println!("{} {}", "❌ Auto failed:".red(), e);
                    failures += 1;
                }
            },
            (Mode::Compare, Some(pipeline)) => {
                let outcome = pipeline.compare_both(&text).await;
                print_record("PATTERN", &outcome.pattern, None);
                match outcome.model {
                    Ok((record, usage)) => print_record("MODEL", &record, Some(usage)),
                    Err(e) => {
                        println!("{} {}", "❌ Model failed:".red(), e);
                        failures += 1;
                    }
                }
                if let Some(c) = outcome.comparison {
                    println!();
                    println!("{}", "🔍 COMPARISON".bold());
                    println!("   Merchant match: {}", check(c.merchant_match));
                    println!("   Total match:    {}", check(c.total_match));
                    println!(
                        "   Items:          pattern={} model={}",
                        c.items_count.pattern, c.items_count.model
                    );
                }
            }
            _ => unreachable!("pipeline is built for every mode except pattern"),
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} extraction(s) failed");
    }
    Ok(())
}

fn check(matched: bool) -> String {
    if matched {
        "✅".green().to_string()
    } else {
        "❌".red().to_string()
    }
}

fn print_record(label: &str, record: &ReceiptRecord, usage: Option<UsageStats>) {
    println!();
    println!("{}", format!("🔧 {label}").bold());
    println!("{}", "-".repeat(70));
    println!("   Merchant: {}", field(&record.merchant));
    println!("   Date:     {}", field(&record.date));
    println!("   Invoice:  {}", field(&record.invoice_number));
    println!("   Items:    {}", record.items.len());
    for item in &record.items {
        println!("     - {}: ${}", item.description, item.amount);
    }
    println!("   Subtotal: {}", money(&record.subtotal));
    println!("   Tax:      {}", money(&record.tax));
    println!("   💰 Total: {}", money(&record.total).bold());
    if let Some(usage) = usage {
        println!(
            "   Tokens:   {} in / {} out / {} total",
            usage.input_tokens, usage.output_tokens, usage.total_tokens
        );
    }
}

fn field(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".dimmed().to_string())
}

fn money(value: &Option<rust_decimal::Decimal>) -> String {
    match value {
        Some(amount) => format!("${amount}"),
        None => "N/A".dimmed().to_string(),
    }
}
