//! Payment sub-flow
//!
//! Paid joins go through: create order -> checkout -> verify -> join.
//! The checkout widget is an external collaborator behind [`Checkout`].

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{Club, OrderResponse, PaymentConfirmation, UserInfo};

use crate::ClientConfig;

/// Everything the checkout widget needs to collect a payment
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    /// Gateway key id; from the order, else the configured fallback
    pub key_id: Option<String>,
    pub order_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub merchant_name: String,
    pub description: String,
    pub club_id: i64,
    pub prefill_name: Option<String>,
    pub prefill_email: Option<String>,
}

impl CheckoutRequest {
    pub fn new(config: &ClientConfig, order: &OrderResponse, club: &Club, user: &UserInfo) -> Self {
        Self {
            key_id: order
                .razorpay_key_id
                .clone()
                .or_else(|| config.fallback_key_id.clone()),
            order_id: order.order_id.clone(),
            amount: order.amount,
            currency: order
                .currency
                .clone()
                .unwrap_or_else(|| config.currency.clone()),
            merchant_name: config.merchant_name.clone(),
            description: format!("Membership for {}", club.name),
            club_id: club.id,
            prefill_name: user.name.clone(),
            prefill_email: user.email.clone(),
        }
    }
}

/// Result of handing an order to the checkout widget
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Signed confirmation to pass to the verify endpoint
    Confirmed(PaymentConfirmation),
    /// The user dismissed the widget
    Cancelled,
    /// The widget reported a failed charge
    Failed(String),
}

/// External payment-checkout collaborator
#[async_trait]
pub trait Checkout: Send + Sync {
    async fn open(&self, request: CheckoutRequest) -> CheckoutOutcome;
}
