use std::fmt::Display;

use cpg_common::CryptoAmount;
use crypto_payment_engine::db_types::{PaymentId, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/notify`. All fields are required on the wire; they are `Option`s here so the handler can
/// produce the explicit "Missing fields" 400 body instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPaymentParams {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub crypto: Option<String>,
    /// The amount the web client displayed. Required on the wire for compatibility, but the server recomputes
    /// the authoritative amount through the price oracle.
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentResult {
    pub success: bool,
    pub payment_id: PaymentId,
    pub exact_amount: CryptoAmount,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePreview {
    pub success: bool,
    pub exact_amount: CryptoAmount,
    pub rate: f64,
    pub currency: String,
}

/// The status-lookup response. Plain strings rather than [`PaymentStatus`] so that an id the store has never
/// seen can be reported as `"unknown"` with the same shape, keeping polling clients simple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: String,
}

impl StatusResult {
    pub fn unknown() -> Self {
        Self { status: "unknown".to_string() }
    }
}

impl From<PaymentStatus> for StatusResult {
    fn from(status: PaymentStatus) -> Self {
        Self { status: status.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Display>(error: S) -> Self {
        Self { success: false, error: error.to_string() }
    }
}
