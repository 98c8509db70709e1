//! Payment DTOs
//!
//! Order creation, checkout confirmation and signature verification for
//! fee-based clubs. Field names follow the gateway's (Razorpay) wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default currency of club fees
pub const DEFAULT_CURRENCY: &str = "INR";

/// `POST /payments/create-order?userId=` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub amount: Decimal,
    pub currency: String,
    pub club_id: i64,
}

/// Order token handed to the checkout widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub razorpay_key_id: Option<String>,
}

/// Signed fields returned by the checkout widget on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// `POST /payments/verify` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub user_id: i64,
    pub club_id: i64,
}

impl PaymentVerification {
    pub fn new(confirmation: PaymentConfirmation, user_id: i64, club_id: i64) -> Self {
        Self {
            razorpay_order_id: confirmation.razorpay_order_id,
            razorpay_payment_id: confirmation.razorpay_payment_id,
            razorpay_signature: confirmation.razorpay_signature,
            user_id,
            club_id,
        }
    }
}

/// Payment history entry (`GET /payments/user/{userId}`, `GET /payments/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub club_id: Option<i64>,
}
