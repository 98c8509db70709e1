//! Terminal collaborators: confirmation prompts and manual checkout

use std::io::{self, Write};

use async_trait::async_trait;
use tribe_client::view::fee_label;
use tribe_client::{
    Checkout, CheckoutOutcome, CheckoutRequest, Confirm, Fee, PaymentConfirmation,
};

/// Print `prompt` and read one trimmed line from stdin
async fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    })
    .await
    .map_err(io::Error::other)?
}

/// `[y/N]` prompt, or a fixed yes with `--yes`
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match read_line(&format!("{prompt} [y/N] ")).await {
            Ok(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Checkout for terminals: shows the order and reads the payment id and
/// signature produced by the hosted payment page. Empty input cancels.
pub struct TerminalCheckout;

#[async_trait]
impl Checkout for TerminalCheckout {
    async fn open(&self, request: CheckoutRequest) -> CheckoutOutcome {
        println!("{}", request.merchant_name);
        println!("  {}", request.description);
        println!("  Order:    {}", request.order_id);
        println!(
            "  Amount:   {} {} (minor units)",
            request.amount, request.currency
        );
        if let Some(key) = &request.key_id {
            println!("  Key:      {key}");
        }
        if let Some(email) = &request.prefill_email {
            println!("  Email:    {email}");
        }
        println!("Complete the payment, then paste the result (empty to cancel).");

        let payment_id = match read_line("Payment id: ").await {
            Ok(id) if !id.is_empty() => id,
            Ok(_) => return CheckoutOutcome::Cancelled,
            Err(e) => return CheckoutOutcome::Failed(e.to_string()),
        };
        let signature = match read_line("Signature: ").await {
            Ok(sig) if !sig.is_empty() => sig,
            Ok(_) => return CheckoutOutcome::Cancelled,
            Err(e) => return CheckoutOutcome::Failed(e.to_string()),
        };

        CheckoutOutcome::Confirmed(PaymentConfirmation {
            razorpay_order_id: request.order_id,
            razorpay_payment_id: payment_id,
            razorpay_signature: signature,
        })
    }
}

/// One-line fee summary shown before a paid join
pub fn fee_notice(fee: Fee) -> Option<String> {
    match fee {
        Fee::Free => None,
        Fee::Paid(_) => Some(format!("This club has a membership fee of {}", fee_label(fee))),
    }
}
