use crate::core::{Quote, SubmissionResult, SwapError, BRIDGE_AMOUNT_LAMPORTS};
use crate::utils::format_lamports;
use colored::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Terminal output for quotes and bridge results
pub struct BridgeDisplay;

impl BridgeDisplay {
    /// Display a quote and its steps
    pub fn display_quote(quote: &Quote, user: &str, recipient: &str) {
        println!("\n{}", style("🌉 Bridge Quote").bold().underlined());
        println!(
            "Send: {} from {}",
            format_lamports(BRIDGE_AMOUNT_LAMPORTS).bold(),
            style(user).dim()
        );
        println!("To:   {} on Base", style(recipient).dim());

        if let Some(out) = quote
            .details
            .as_ref()
            .and_then(|d| d.pointer("/currencyOut/amountFormatted"))
            .and_then(Value::as_str)
        {
            println!("Receive: {} ETH", out.green().bold());
        }

        if let Some(fees) = quote.fees.as_ref().and_then(Value::as_object) {
            for (name, fee) in fees {
                if let Some(amount) = fee.get("amountFormatted").and_then(Value::as_str) {
                    let symbol = fee
                        .pointer("/currency/symbol")
                        .and_then(Value::as_str)
                        .unwrap_or("");
                    println!("  Fee ({}): {} {}", name, amount, symbol);
                }
            }
        }

        for (i, step) in quote.steps.iter().enumerate() {
            println!(
                "{} Step {}: {} [{}] {} item(s)",
                style("►").cyan(),
                i + 1,
                step.description.as_deref().unwrap_or("-"),
                step.kind.yellow(),
                step.items.len()
            );
            if let Some(request_id) = &step.request_id {
                println!("  Request: {}", style(request_id).dim());
            }
        }
        println!();
    }

    /// Create a progress bar for operations
    pub fn create_progress_bar(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }

    /// Display a settled bridge transfer
    pub fn display_submission(result: &SubmissionResult) {
        println!("\n{}", style("✅ Bridge Settled!").bold().green());
        println!("Signature: {}", style(result.signature.to_string()).dim());
        if let Some(at) = chrono::DateTime::from_timestamp(result.submitted_at, 0) {
            println!("Submitted: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!(
            "\n{}",
            style(format!(
                "View on Solscan: https://solscan.io/tx/{}",
                result.signature
            ))
            .dim()
        );
    }

    pub fn display_error(error: &SwapError) {
        println!("{} {}", "❌ Bridge failed:".red().bold(), error);
        if error.is_settlement_pending() {
            println!(
                "{}",
                "The deposit was sent but Relay has not reported it settled yet. \
                 Check the request on relay.link before retrying."
                    .yellow()
            );
        } else if error.is_safe_to_retry() {
            println!("{}", "Nothing was sent. It is safe to retry.".yellow());
        }
    }
}
